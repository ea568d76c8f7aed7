use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::error::AuthError;

/// The authenticated user as reported by the auth service or a validated
/// token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A token pair returned by a successful sign-in or refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub user: AuthUser,
}

/// HTTP client for a GoTrue-style auth endpoint (`{base_url}/auth/v1`).
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Sign in with email and password.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        info!(email, "initiating password sign-in");

        let resp = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        parse_session(resp).await
    }

    /// Exchange a refresh token for a fresh session.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let resp = self
            .http
            .post(format!("{}/auth/v1/token", self.base_url))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        parse_session(resp).await
    }

    /// Resolve the user behind an access token via the auth service.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::Unauthenticated);
        }
        if !resp.status().is_success() {
            return Err(AuthError::AuthFailed(format!(
                "user lookup returned {}",
                resp.status()
            )));
        }

        resp.json::<AuthUser>()
            .await
            .map_err(|e| AuthError::Http(e.to_string()))
    }
}

async fn parse_session(resp: reqwest::Response) -> Result<Session, AuthError> {
    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::BAD_REQUEST {
        return Err(AuthError::Unauthenticated);
    }
    if !status.is_success() {
        return Err(AuthError::AuthFailed(format!("token endpoint returned {status}")));
    }

    resp.json::<Session>()
        .await
        .map_err(|e| AuthError::Http(e.to_string()))
}
