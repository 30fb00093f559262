//! Abstract storage traits for poolscan.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The query engine depends only on the traits.

pub mod error;
pub mod pool;

pub use error::StoreError;
pub use pool::PoolStore;
