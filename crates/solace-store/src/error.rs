use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found in {collection}")]
    NotFound { collection: String },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store configuration error: {0}")]
    Config(String),
}
