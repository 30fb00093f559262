//! Pool (block) and pool hash types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Address, Transaction, TypesError};

/// A 32-byte pool hash, the content key of a pool in the store.
///
/// [`PoolHash::ZERO`] is the sentinel meaning "no predecessor".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolHash([u8; 32]);

impl Default for PoolHash {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PoolHash {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for PoolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoolHash(")?;
        for b in &self.0[..4] {
            write!(f, "{:02x}", b)?;
        }
        write!(f, "\u{2026})")
    }
}

impl fmt::Display for PoolHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for PoolHash {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|_| TypesError::InvalidHash(s.to_string()))?;
        Ok(Self(bytes))
    }
}

/// An immutable pool: an ordered run of transactions linked to its
/// predecessor by hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    hash: PoolHash,
    previous_hash: PoolHash,
    sequence: u64,
    transactions: Vec<Transaction>,
}

impl Pool {
    /// Assemble a pool from already-sealed parts. The hash is taken as given;
    /// use `poolscan_crypto::seal_pool` to derive it from the content.
    pub fn from_parts(
        hash: PoolHash,
        previous_hash: PoolHash,
        sequence: u64,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            hash,
            previous_hash,
            sequence,
            transactions,
        }
    }

    pub fn hash(&self) -> &PoolHash {
        &self.hash
    }

    pub fn previous_hash(&self) -> &PoolHash {
        &self.previous_hash
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Whether this pool has no predecessor.
    pub fn is_first(&self) -> bool {
        self.previous_hash.is_zero()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// The last transaction in stored order whose source is `address`.
    pub fn last_by_source(&self, address: &Address) -> Option<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .find(|tx| tx.source() == address)
    }

    pub fn has_source(&self, address: &Address) -> bool {
        self.transactions.iter().any(|tx| tx.source() == address)
    }
}
