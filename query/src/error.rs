use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("store is unavailable: {0}")]
    StoreUnavailable(String),

    #[error("storage error: {0}")]
    Store(#[from] poolscan_store::StoreError),
}
