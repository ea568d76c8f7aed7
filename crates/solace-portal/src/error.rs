use thiserror::Error;

use solace_store::error::StoreError;

/// Failure taxonomy for the portal flows. All variants are terminal for the
/// current operation; nothing is retried or compensated here. The caller
/// picks the user-facing messaging per kind.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("invalid assignment reference")]
    InvalidReference,

    #[error("record not found")]
    NotFound,

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("every question needs exactly one answer")]
    IncompleteAnswers,

    #[error("result write failed: {0}")]
    ResultWrite(String),

    /// The result row was written but the status transition failed, so the
    /// assignment still reads as assigned. Requires reconciliation; must
    /// stay distinguishable from [`PortalError::ResultWrite`].
    #[error("status update failed after result write: {0}")]
    StatusUpdate(String),

    #[error("assignment is already completed")]
    AlreadyCompleted,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("write failed: {0}")]
    Write(String),
}

impl PortalError {
    /// Classify a store failure on a read path.
    pub(crate) fn from_read(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => PortalError::NotFound,
            other => PortalError::Fetch(other.to_string()),
        }
    }
}
