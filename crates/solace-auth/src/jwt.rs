use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims extracted from an access token issued by the auth service.
#[derive(Debug, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Validate an HS256 access token against the project's JWT secret.
///
/// Hosted GoTrue deployments sign access tokens with a per-project shared
/// secret, so the API can verify sessions without a network round trip.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    // GoTrue sets aud to "authenticated"; deployments differ, so don't pin it.
    validation.validate_aud = false;

    let token_data = decode::<TokenClaims>(token, &DecodingKey::from_secret(secret), &validation)?;

    if let Some(role) = &token_data.claims.role
        && role != "authenticated"
    {
        return Err(AuthError::InvalidToken(format!("unexpected role: {role}")));
    }

    Ok(token_data.claims)
}
