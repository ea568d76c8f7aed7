use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use solace_auth::error::AuthError;
use solace_auth::jwt::validate_token;
use solace_auth::session::{JwtSession, SessionProvider};

const SECRET: &[u8] = b"test-project-jwt-secret";

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: u64,
    role: String,
    email: Option<String>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

fn sign(claims: &Claims, secret: &[u8]) -> String {
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
}

#[test]
fn accepts_a_valid_token() {
    let sub = Uuid::new_v4();
    let token = sign(
        &Claims {
            sub: sub.to_string(),
            exp: unix_now() + 3600,
            role: "authenticated".to_string(),
            email: Some("pat@example.com".to_string()),
        },
        SECRET,
    );

    let claims = validate_token(&token, SECRET).unwrap();
    assert_eq!(claims.sub, sub.to_string());
    assert_eq!(claims.email.as_deref(), Some("pat@example.com"));
}

#[test]
fn rejects_an_expired_token() {
    let token = sign(
        &Claims {
            sub: Uuid::new_v4().to_string(),
            exp: unix_now().saturating_sub(3600),
            role: "authenticated".to_string(),
            email: None,
        },
        SECRET,
    );

    assert!(validate_token(&token, SECRET).is_err());
}

#[test]
fn rejects_a_token_signed_with_another_secret() {
    let token = sign(
        &Claims {
            sub: Uuid::new_v4().to_string(),
            exp: unix_now() + 3600,
            role: "authenticated".to_string(),
            email: None,
        },
        b"some-other-secret",
    );

    assert!(validate_token(&token, SECRET).is_err());
}

#[test]
fn rejects_an_unexpected_role() {
    let token = sign(
        &Claims {
            sub: Uuid::new_v4().to_string(),
            exp: unix_now() + 3600,
            role: "service_role".to_string(),
            email: None,
        },
        SECRET,
    );

    let err = validate_token(&token, SECRET).unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken(_)));
}

#[tokio::test]
async fn jwt_session_resolves_the_user() {
    let sub = Uuid::new_v4();
    let token = sign(
        &Claims {
            sub: sub.to_string(),
            exp: unix_now() + 3600,
            role: "authenticated".to_string(),
            email: None,
        },
        SECRET,
    );

    let session = JwtSession::new(SECRET.to_vec());
    let user = session.current_user(&token).await.unwrap();
    assert_eq!(user.id, sub);
}

#[tokio::test]
async fn jwt_session_rejects_a_non_uuid_subject() {
    let token = sign(
        &Claims {
            sub: "service-account".to_string(),
            exp: unix_now() + 3600,
            role: "authenticated".to_string(),
            email: None,
        },
        SECRET,
    );

    let session = JwtSession::new(SECRET.to_vec());
    assert!(session.current_user(&token).await.is_err());
}
