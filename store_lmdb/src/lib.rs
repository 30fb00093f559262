//! LMDB storage backend for poolscan.
//!
//! Implements [`poolscan_store::PoolStore`] using the `heed` LMDB bindings.
//! Pools live in one database keyed by hash; the head pointer and schema
//! version live in a small meta database.

pub mod environment;
pub mod error;
pub mod integrity;
pub mod pool;

pub use environment::{LmdbEnvironment, CURRENT_SCHEMA_VERSION};
pub use error::LmdbError;
pub use pool::LmdbPoolStore;
