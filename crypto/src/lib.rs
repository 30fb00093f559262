//! Digest primitives for poolscan.
//!
//! - **Blake2b** for pool content hashes
//! - Address canonicalization: user-facing address strings to 32-byte keys
//! - Pool sealing: content hash plus per-transaction ids

pub mod address;
pub mod hash;

pub use address::canonicalize_address;
pub use hash::{blake2b_256, hash_pool, seal_pool};
