//! Nullable store: thread-safe in-memory pool chain for testing.

use poolscan_crypto::seal_pool;
use poolscan_store::{PoolStore, StoreError};
use poolscan_types::{Pool, PoolHash, Transaction};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// An in-memory pool store for testing.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullPoolStore {
    pools: RwLock<HashMap<PoolHash, Pool>>,
    head: RwLock<PoolHash>,
    open_error: Option<String>,
    loads: AtomicU64,
}

impl NullPoolStore {
    pub fn new() -> Self {
        Self {
            pools: RwLock::new(HashMap::new()),
            head: RwLock::new(PoolHash::ZERO),
            open_error: None,
            loads: AtomicU64::new(0),
        }
    }

    /// A store that failed to open with the given message.
    pub fn closed(message: impl Into<String>) -> Self {
        Self {
            open_error: Some(message.into()),
            ..Self::new()
        }
    }

    /// Seal `transactions` into a pool on top of the current head and make
    /// it the new head. The sequence continues from the head (1 for the
    /// first pool).
    pub fn append(&self, transactions: Vec<Transaction>) -> Pool {
        let previous = *self.head.read().unwrap();
        let sequence = self
            .pools
            .read()
            .unwrap()
            .get(&previous)
            .map(|p| p.sequence() + 1)
            .unwrap_or(1);
        let pool = seal_pool(previous, sequence, transactions);
        self.insert(pool.clone());
        self.set_head(*pool.hash());
        pool
    }

    /// Insert an arbitrary pool without moving the head.
    pub fn insert(&self, pool: Pool) {
        self.pools.write().unwrap().insert(*pool.hash(), pool);
    }

    pub fn set_head(&self, hash: PoolHash) {
        *self.head.write().unwrap() = hash;
    }

    /// Number of `load_pool` calls served so far.
    pub fn loads(&self) -> u64 {
        self.loads.load(Ordering::Relaxed)
    }

    fn check_open(&self) -> Result<(), StoreError> {
        match &self.open_error {
            Some(message) => Err(StoreError::NotOpen(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for NullPoolStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolStore for NullPoolStore {
    fn is_open(&self) -> bool {
        self.open_error.is_none()
    }

    fn last_error_message(&self) -> String {
        self.open_error.clone().unwrap_or_default()
    }

    fn head_hash(&self) -> Result<PoolHash, StoreError> {
        self.check_open()?;
        Ok(*self.head.read().unwrap())
    }

    fn load_pool(&self, hash: &PoolHash) -> Result<Option<Pool>, StoreError> {
        self.check_open()?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.pools.read().unwrap().get(hash).cloned())
    }

    fn pool_count(&self) -> Result<u64, StoreError> {
        self.check_open()?;
        Ok(self.pools.read().unwrap().len() as u64)
    }
}
