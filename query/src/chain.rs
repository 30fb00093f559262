//! Backward chain traversal and chain pagination.

use poolscan_store::PoolStore;
use poolscan_types::{Pool, PoolHash};

use crate::QueryError;

/// Iterator over pools from a starting hash toward genesis.
///
/// Stops at the [`PoolHash::ZERO`] sentinel, at a hash the store does not
/// hold, or at a pool whose sequence is not strictly below the previous
/// one's. A store error is yielded once and ends the walk.
pub struct ChainWalker<'a> {
    store: &'a dyn PoolStore,
    next: PoolHash,
    last_sequence: Option<u64>,
    finished: bool,
}

impl<'a> ChainWalker<'a> {
    pub fn new(store: &'a dyn PoolStore, start: PoolHash) -> Self {
        Self {
            store,
            next: start,
            last_sequence: None,
            finished: false,
        }
    }

    /// Walk from the current chain head.
    pub fn from_head(store: &'a dyn PoolStore) -> Result<Self, QueryError> {
        Ok(Self::new(store, store.head_hash()?))
    }

    /// Advance past `count` pools, returning how many were actually passed.
    pub fn advance(&mut self, count: usize) -> Result<usize, QueryError> {
        for passed in 0..count {
            match self.next() {
                Some(pool) => {
                    pool?;
                }
                None => return Ok(passed),
            }
        }
        Ok(count)
    }
}

impl Iterator for ChainWalker<'_> {
    type Item = Result<Pool, QueryError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.next.is_zero() {
            return None;
        }
        let pool = match self.store.load_pool(&self.next) {
            Ok(Some(pool)) => pool,
            Ok(None) => {
                tracing::debug!(hash = %self.next, "chain walk reached a missing pool");
                self.finished = true;
                return None;
            }
            Err(e) => {
                self.finished = true;
                return Some(Err(e.into()));
            }
        };
        if let Some(last) = self.last_sequence {
            if pool.sequence() >= last {
                tracing::warn!(
                    hash = %pool.hash(),
                    sequence = pool.sequence(),
                    successor_sequence = last,
                    "pool sequence does not decrease, stopping chain walk"
                );
                self.finished = true;
                return None;
            }
        }
        self.last_sequence = Some(pool.sequence());
        self.next = *pool.previous_hash();
        Some(Ok(pool))
    }
}

/// Skip `offset` pools back from the head, then collect up to `limit` more.
///
/// A chain shorter than `offset + limit` yields a short (possibly empty)
/// page.
pub fn pool_page(
    store: &dyn PoolStore,
    offset: usize,
    limit: usize,
) -> Result<Vec<Pool>, QueryError> {
    if limit == 0 {
        return Ok(Vec::new());
    }
    let mut walker = ChainWalker::from_head(store)?;
    if walker.advance(offset)? < offset {
        return Ok(Vec::new());
    }
    walker.take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolscan_nullables::NullPoolStore;

    fn store_with(len: usize) -> (NullPoolStore, Vec<Pool>) {
        let store = NullPoolStore::new();
        let pools = (0..len).map(|_| store.append(vec![])).collect();
        (store, pools)
    }

    fn sequences(pools: &[Pool]) -> Vec<u64> {
        pools.iter().map(Pool::sequence).collect()
    }

    #[test]
    fn walks_head_to_genesis() {
        let (store, _) = store_with(4);
        let seqs: Vec<u64> = ChainWalker::from_head(&store)
            .unwrap()
            .map(|p| p.unwrap().sequence())
            .collect();
        assert_eq!(seqs, vec![4, 3, 2, 1]);
    }

    #[test]
    fn empty_chain_yields_nothing() {
        let store = NullPoolStore::new();
        assert_eq!(ChainWalker::from_head(&store).unwrap().count(), 0);
        assert!(pool_page(&store, 0, 10).unwrap().is_empty());
    }

    #[test]
    fn page_skips_offset() {
        let (store, _) = store_with(5);
        assert_eq!(sequences(&pool_page(&store, 0, 2).unwrap()), vec![5, 4]);
        assert_eq!(sequences(&pool_page(&store, 2, 2).unwrap()), vec![3, 2]);
    }

    #[test]
    fn page_truncated_by_short_chain() {
        let (store, _) = store_with(3);
        assert_eq!(sequences(&pool_page(&store, 2, 100).unwrap()), vec![1]);
        // Each stored pool is read once; the sentinel is never dereferenced.
        assert_eq!(store.loads(), 3);

        let before = store.loads();
        assert_eq!(sequences(&pool_page(&store, 1, 10).unwrap()), vec![2, 1]);
        assert_eq!(store.loads() - before, 3);

        let before = store.loads();
        assert!(pool_page(&store, 3, 10).unwrap().is_empty());
        assert!(pool_page(&store, 100, 1).unwrap().is_empty());
        assert_eq!(store.loads() - before, 6);
    }

    #[test]
    fn zero_limit_loads_nothing() {
        let (store, _) = store_with(3);
        assert!(pool_page(&store, 0, 0).unwrap().is_empty());
        assert_eq!(store.loads(), 0);
    }

    #[test]
    fn page_does_not_walk_past_limit() {
        let (store, _) = store_with(10);
        pool_page(&store, 2, 3).unwrap();
        assert_eq!(store.loads(), 5);
    }

    #[test]
    fn missing_predecessor_ends_walk() {
        let store = NullPoolStore::new();
        let orphan = poolscan_crypto::seal_pool(PoolHash::new([7; 32]), 9, vec![]);
        store.insert(orphan.clone());
        store.set_head(*orphan.hash());
        assert_eq!(sequences(&pool_page(&store, 0, 5).unwrap()), vec![9]);
    }

    #[test]
    fn cycle_is_cut_by_sequence_check() {
        let store = NullPoolStore::new();
        // Two pools pointing at each other through forged hashes.
        let a_hash = PoolHash::new([0xA; 32]);
        let b_hash = PoolHash::new([0xB; 32]);
        store.insert(Pool::from_parts(a_hash, b_hash, 2, vec![]));
        store.insert(Pool::from_parts(b_hash, a_hash, 1, vec![]));
        store.set_head(a_hash);
        assert_eq!(sequences(&pool_page(&store, 0, 100).unwrap()), vec![2, 1]);
    }

    #[test]
    fn advance_reports_short_chain() {
        let (store, _) = store_with(2);
        let mut walker = ChainWalker::from_head(&store).unwrap();
        assert_eq!(walker.advance(5).unwrap(), 2);
        assert!(walker.next().is_none());
    }
}
