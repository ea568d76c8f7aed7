use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("auth request failed: {0}")]
    Http(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
