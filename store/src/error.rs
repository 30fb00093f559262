use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store is not open: {0}")]
    NotOpen(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("database is corrupted: {0}")]
    Corruption(String),
}
