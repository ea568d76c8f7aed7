use async_trait::async_trait;
use uuid::Uuid;

use crate::client::{AuthClient, AuthUser};
use crate::error::AuthError;
use crate::jwt;

/// Resolves the user behind an access token. Token lifecycle and refresh
/// are the auth service's concern, not the portal's.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError>;
}

/// Session resolution via the remote auth service's `/user` endpoint.
#[async_trait]
impl SessionProvider for AuthClient {
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        self.get_user(access_token).await
    }
}

/// Session resolution by validating the token locally against the project
/// JWT secret. No network round trip per request.
pub struct JwtSession {
    secret: Vec<u8>,
}

impl JwtSession {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl SessionProvider for JwtSession {
    async fn current_user(&self, access_token: &str) -> Result<AuthUser, AuthError> {
        let claims = jwt::validate_token(access_token, &self.secret)?;
        let id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|e| AuthError::InvalidToken(format!("sub is not a uuid: {e}")))?;
        Ok(AuthUser {
            id,
            email: claims.email,
        })
    }
}
