//! LMDB implementation of PoolStore.

use std::path::Path;

use poolscan_store::{PoolStore, StoreError};
use poolscan_types::{Pool, PoolHash};

use crate::environment::{LmdbEnvironment, HEAD_KEY};
use crate::LmdbError;

/// Pool store backed by an LMDB environment.
///
/// Opening never fails outright: a backend that could not be opened reports
/// `is_open() == false` and keeps the failure in `last_error_message()`, so
/// the caller decides whether to serve.
pub struct LmdbPoolStore {
    env: Option<LmdbEnvironment>,
    last_error: String,
}

impl LmdbPoolStore {
    pub fn open(path: &Path, map_size: usize) -> Self {
        match LmdbEnvironment::open(path, map_size) {
            Ok(env) => Self {
                env: Some(env),
                last_error: String::new(),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to open pool store");
                Self {
                    env: None,
                    last_error: e.to_string(),
                }
            }
        }
    }

    pub fn environment(&self) -> Option<&LmdbEnvironment> {
        self.env.as_ref()
    }

    fn env(&self) -> Result<&LmdbEnvironment, StoreError> {
        self.env
            .as_ref()
            .ok_or_else(|| StoreError::NotOpen(self.last_error.clone()))
    }

    /// Store a pool without touching the head pointer.
    pub fn put_pool(&self, pool: &Pool) -> Result<(), StoreError> {
        let env = self.env()?;
        let bytes = bincode::serialize(pool).map_err(LmdbError::from)?;
        let mut wtxn = env.env.write_txn().map_err(LmdbError::from)?;
        env.pools_db
            .put(&mut wtxn, pool.hash().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    /// Store a pool and make it the chain head in one write transaction.
    pub fn append_pool(&self, pool: &Pool) -> Result<(), StoreError> {
        let env = self.env()?;
        let bytes = bincode::serialize(pool).map_err(LmdbError::from)?;
        let mut wtxn = env.env.write_txn().map_err(LmdbError::from)?;
        env.pools_db
            .put(&mut wtxn, pool.hash().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        env.meta_db
            .put(&mut wtxn, HEAD_KEY, pool.hash().as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        tracing::debug!(hash = %pool.hash(), sequence = pool.sequence(), "appended pool");
        Ok(())
    }
}

impl PoolStore for LmdbPoolStore {
    fn is_open(&self) -> bool {
        self.env.is_some()
    }

    fn last_error_message(&self) -> String {
        self.last_error.clone()
    }

    fn head_hash(&self) -> Result<PoolHash, StoreError> {
        let env = self.env()?;
        let rtxn = env.env.read_txn().map_err(LmdbError::from)?;
        match env.meta_db.get(&rtxn, HEAD_KEY).map_err(LmdbError::from)? {
            Some(bytes) => {
                let arr: [u8; 32] = bytes.try_into().map_err(|_| {
                    LmdbError::Corruption("head pointer has unexpected byte length".to_string())
                })?;
                Ok(PoolHash::new(arr))
            }
            None => Ok(PoolHash::ZERO),
        }
    }

    fn load_pool(&self, hash: &PoolHash) -> Result<Option<Pool>, StoreError> {
        if hash.is_zero() {
            return Ok(None);
        }
        let env = self.env()?;
        let rtxn = env.env.read_txn().map_err(LmdbError::from)?;
        let Some(bytes) = env
            .pools_db
            .get(&rtxn, hash.as_bytes().as_slice())
            .map_err(LmdbError::from)?
        else {
            return Ok(None);
        };
        let pool: Pool = bincode::deserialize(bytes).map_err(LmdbError::from)?;
        if pool.hash() != hash {
            return Err(LmdbError::Corruption(format!(
                "pool stored under {} claims hash {}",
                hash,
                pool.hash()
            ))
            .into());
        }
        Ok(Some(pool))
    }

    fn pool_count(&self) -> Result<u64, StoreError> {
        let env = self.env()?;
        let rtxn = env.env.read_txn().map_err(LmdbError::from)?;
        Ok(env.pools_db.len(&rtxn).map_err(LmdbError::from)?)
    }
}
