//! Nullable infrastructure for deterministic testing.
//!
//! The pool store is abstracted behind [`poolscan_store::PoolStore`]. This
//! crate provides an in-memory implementation that:
//! - Returns deterministic values
//! - Can be built and inspected programmatically
//! - Never touches the filesystem
//!
//! Usage: swap the LMDB store for [`NullPoolStore`] in tests.

pub mod store;

pub use store::NullPoolStore;
