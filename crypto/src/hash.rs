//! Blake2b hashing for pools.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use poolscan_types::{Pool, PoolHash, Transaction, TransactionId, UserField};

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Content hash of a pool.
///
/// Covers the predecessor, the sequence and every transaction field except
/// the id (ids are derived from this hash).
pub fn hash_pool(previous: &PoolHash, sequence: u64, transactions: &[Transaction]) -> PoolHash {
    let mut hasher = Blake2b256::new();
    hasher.update(previous.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update((transactions.len() as u64).to_le_bytes());
    for tx in transactions {
        hasher.update(tx.source().as_bytes());
        hasher.update(tx.target().as_bytes());
        hasher.update(tx.amount().integral().to_le_bytes());
        hasher.update(tx.amount().fraction().to_le_bytes());
        update_str(&mut hasher, tx.currency().as_str());
        hasher.update(tx.balance().integral().to_le_bytes());
        hasher.update(tx.balance().fraction().to_le_bytes());
        hasher.update((tx.user_fields().len() as u64).to_le_bytes());
        for (id, field) in tx.user_fields() {
            hasher.update(id.to_le_bytes());
            match field {
                UserField::Integer(v) => {
                    hasher.update([0u8]);
                    hasher.update(v.to_le_bytes());
                }
                UserField::Text(s) => {
                    hasher.update([1u8]);
                    update_str(&mut hasher, s);
                }
                UserField::Amount(a) => {
                    hasher.update([2u8]);
                    hasher.update(a.integral().to_le_bytes());
                    hasher.update(a.fraction().to_le_bytes());
                }
            }
        }
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    PoolHash::new(output)
}

fn update_str(hasher: &mut Blake2b256, s: &str) {
    hasher.update((s.len() as u64).to_le_bytes());
    hasher.update(s.as_bytes());
}

/// Seal a pool: compute its content hash and assign each transaction the id
/// `(hash, position)`. Any ids already on the transactions are replaced.
pub fn seal_pool(previous: PoolHash, sequence: u64, transactions: Vec<Transaction>) -> Pool {
    let hash = hash_pool(&previous, sequence, &transactions);
    let transactions = transactions
        .into_iter()
        .enumerate()
        .map(|(index, tx)| tx.with_id(TransactionId::new(hash, index as u32)))
        .collect();
    Pool::from_parts(hash, previous, sequence, transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolscan_types::{Address, Amount, Currency};

    fn tx(amount: i64) -> Transaction {
        Transaction::new(
            TransactionId::new(PoolHash::ZERO, 0),
            Address::new([1; 32]),
            Address::new([2; 32]),
            Amount::from_integral(amount),
            Currency::new("CS"),
            Amount::ZERO,
        )
    }

    #[test]
    fn blake2b_deterministic() {
        let h1 = blake2b_256(b"hello pool");
        let h2 = blake2b_256(b"hello pool");
        assert_eq!(h1, h2);
    }

    #[test]
    fn blake2b_different_inputs() {
        let h1 = blake2b_256(b"hello");
        let h2 = blake2b_256(b"world");
        assert_ne!(h1, h2);
    }

    #[test]
    fn pool_hash_depends_on_content() {
        let a = hash_pool(&PoolHash::ZERO, 1, &[tx(5)]);
        let b = hash_pool(&PoolHash::ZERO, 1, &[tx(6)]);
        let c = hash_pool(&PoolHash::ZERO, 2, &[tx(5)]);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, hash_pool(&PoolHash::ZERO, 1, &[tx(5)]));
    }

    #[test]
    fn pool_hash_ignores_ids() {
        let renumbered = tx(5).with_id(TransactionId::new(PoolHash::new([9; 32]), 4));
        assert_eq!(
            hash_pool(&PoolHash::ZERO, 1, &[tx(5)]),
            hash_pool(&PoolHash::ZERO, 1, &[renumbered])
        );
    }

    #[test]
    fn seal_assigns_ids() {
        let pool = seal_pool(PoolHash::ZERO, 1, vec![tx(1), tx(2), tx(3)]);
        assert!(!pool.hash().is_zero());
        for (i, tx) in pool.transactions().iter().enumerate() {
            assert_eq!(tx.id().pool_hash(), pool.hash());
            assert_eq!(tx.id().index() as usize, i);
        }
    }
}
