//! JSON-RPC surface for poolscan.
//!
//! Provides commands for:
//! - Address balances
//! - Single transactions and per-address transaction history
//! - Pool metadata, pool transaction pages and pool lists
//! - Placeholder smart-contract records

pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod pagination;
pub mod server;

pub use commands::RpcCommand;
pub use dispatcher::RpcDispatcher;
pub use error::RpcError;
pub use server::RpcServer;
