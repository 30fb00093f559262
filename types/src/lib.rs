//! Fundamental types for poolscan.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! pool hashes, pools, transactions and their ids, canonical addresses, and amounts.

pub mod address;
pub mod amount;
pub mod error;
pub mod pool;
pub mod transaction;

pub use address::Address;
pub use amount::Amount;
pub use error::TypesError;
pub use pool::{Pool, PoolHash};
pub use transaction::{Currency, Transaction, TransactionId, UserField, SMART_CONTRACT_FIELD};
