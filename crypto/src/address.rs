//! Address canonicalization.
//!
//! User-facing address strings are mapped to a fixed 32-byte key with
//! Blake2b-256. The mapping is a pure function: any byte string is accepted
//! and the same input always yields the same key.

use poolscan_types::Address;

use crate::hash::blake2b_256;

/// Map an externally supplied address string to its canonical store key.
pub fn canonicalize_address(input: impl AsRef<[u8]>) -> Address {
    Address::new(blake2b_256(input.as_ref()))
}
