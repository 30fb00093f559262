//! Transaction pagination within a pool and across the chain.

use poolscan_store::PoolStore;
use poolscan_types::{Address, Pool, Transaction};

use crate::chain::ChainWalker;
use crate::QueryError;

/// The contiguous run of `pool`'s transactions starting at `offset`, at most
/// `limit` long, in stored order.
///
/// An offset at or past the end yields an empty slice; the limit is clamped
/// to what remains.
pub fn paginate(pool: &Pool, offset: usize, limit: usize) -> &[Transaction] {
    let transactions = pool.transactions();
    if offset > transactions.len() {
        return &[];
    }
    let effective = limit.min(transactions.len() - offset);
    &transactions[offset..offset + effective]
}

/// Transactions involving `address` as source or target, newest first.
///
/// Pools are visited from the head backward and each pool's transactions
/// from last to first. The first `offset` matches are skipped and at most
/// `limit` are returned; the walk ends as soon as the page is full.
pub fn address_history(
    store: &dyn PoolStore,
    address: &Address,
    offset: usize,
    limit: usize,
) -> Result<Vec<Transaction>, QueryError> {
    let mut page = Vec::new();
    if limit == 0 {
        return Ok(page);
    }
    let mut to_skip = offset;

    for pool in ChainWalker::from_head(store)? {
        let pool = pool?;
        for tx in pool.transactions().iter().rev().filter(|tx| tx.involves(address)) {
            if to_skip > 0 {
                to_skip -= 1;
                continue;
            }
            page.push(tx.clone());
            if page.len() == limit {
                return Ok(page);
            }
        }
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolscan_nullables::NullPoolStore;
    use poolscan_types::{Amount, Currency, PoolHash, TransactionId};

    fn tx(source: u8, target: u8, amount: i64) -> Transaction {
        Transaction::new(
            TransactionId::new(PoolHash::ZERO, 0),
            Address::new([source; 32]),
            Address::new([target; 32]),
            Amount::from_integral(amount),
            Currency::new("CS"),
            Amount::ZERO,
        )
    }

    fn pool_of(n: i64) -> Pool {
        poolscan_crypto::seal_pool(PoolHash::ZERO, 1, (0..n).map(|i| tx(1, 2, i)).collect())
    }

    fn amounts(txs: &[Transaction]) -> Vec<i64> {
        txs.iter().map(|t| t.amount().integral()).collect()
    }

    #[test]
    fn slice_within_range() {
        let pool = pool_of(5);
        assert_eq!(amounts(paginate(&pool, 1, 3)), vec![1, 2, 3]);
    }

    #[test]
    fn limit_clamped_to_remaining() {
        let pool = pool_of(5);
        assert_eq!(amounts(paginate(&pool, 3, 100)), vec![3, 4]);
    }

    #[test]
    fn offset_at_or_past_end_is_empty() {
        let pool = pool_of(2);
        assert!(paginate(&pool, 2, 5).is_empty());
        assert!(paginate(&pool, 3, 5).is_empty());
        assert!(paginate(&pool, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn zero_limit_is_empty() {
        assert!(paginate(&pool_of(3), 0, 0).is_empty());
    }

    #[test]
    fn empty_pool() {
        assert!(paginate(&pool_of(0), 0, 10).is_empty());
    }

    #[test]
    fn history_newest_first_across_pools() {
        let store = NullPoolStore::new();
        store.append(vec![tx(1, 2, 10), tx(3, 4, 11)]);
        store.append(vec![tx(2, 1, 20), tx(1, 5, 21), tx(6, 7, 22)]);

        let all = address_history(&store, &Address::new([1; 32]), 0, 10).unwrap();
        assert_eq!(amounts(&all), vec![21, 20, 10]);
    }

    #[test]
    fn history_offset_and_limit() {
        let store = NullPoolStore::new();
        store.append(vec![tx(1, 2, 1), tx(1, 2, 2)]);
        store.append(vec![tx(1, 2, 3), tx(1, 2, 4)]);

        let addr = Address::new([2; 32]);
        assert_eq!(amounts(&address_history(&store, &addr, 1, 2).unwrap()), vec![3, 2]);
        assert_eq!(amounts(&address_history(&store, &addr, 3, 5).unwrap()), vec![1]);
        assert!(address_history(&store, &addr, 4, 5).unwrap().is_empty());
    }

    #[test]
    fn history_stops_walking_when_page_full() {
        let store = NullPoolStore::new();
        for i in 0..10 {
            store.append(vec![tx(1, 2, i)]);
        }
        address_history(&store, &Address::new([1; 32]), 0, 2).unwrap();
        assert_eq!(store.loads(), 2);
    }

    #[test]
    fn history_zero_limit_skips_walk() {
        let store = NullPoolStore::new();
        store.append(vec![tx(1, 2, 1)]);
        assert!(address_history(&store, &Address::new([1; 32]), 0, 0)
            .unwrap()
            .is_empty());
        assert_eq!(store.loads(), 0);
    }
}
