//! Pool storage trait.

use crate::StoreError;
use poolscan_types::{Pool, PoolHash};

/// Read access to the content-addressed pool chain.
///
/// Handles are opened once and shared across query workers, so
/// implementations must be safe to read from many threads at once.
pub trait PoolStore: Send + Sync {
    /// Whether the backend opened successfully and can serve reads.
    fn is_open(&self) -> bool;

    /// Human-readable description of the last backend failure, empty if none.
    fn last_error_message(&self) -> String;

    /// Hash of the chain head, or [`PoolHash::ZERO`] for an empty chain.
    fn head_hash(&self) -> Result<PoolHash, StoreError>;

    /// Load a pool by hash. `Ok(None)` if no such pool exists.
    fn load_pool(&self, hash: &PoolHash) -> Result<Option<Pool>, StoreError>;

    /// Total number of pools in the store.
    fn pool_count(&self) -> Result<u64, StoreError>;

    /// Load the chain head, if any.
    fn head_pool(&self) -> Result<Option<Pool>, StoreError> {
        let head = self.head_hash()?;
        if head.is_zero() {
            return Ok(None);
        }
        self.load_pool(&head)
    }
}
