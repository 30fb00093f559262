//! Read-only query engine over the pool chain.
//!
//! The chain is a singly linked list of immutable pools keyed by content
//! hash, walked backward from the head. Every walk ends at the genesis
//! sentinel, at a missing pool, or at a pool whose sequence does not
//! decrease, so no query can loop.

pub mod balance;
pub mod chain;
pub mod context;
pub mod contract;
pub mod error;
pub mod service;
pub mod transactions;

pub use balance::{accumulate_balance, BalanceReport};
pub use chain::{pool_page, ChainWalker};
pub use context::QueryContext;
pub use contract::{find_smart_contract, SmartContract};
pub use error::QueryError;
pub use service::QueryService;
pub use transactions::{address_history, paginate};
