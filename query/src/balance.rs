//! Balance accumulation by backward chain scan.
//!
//! Starting at the head, every visited pool adds the integral sum of all its
//! transactions to a running target total. The scan stops at the first pool
//! (from the head) in which the address appears as a source; the result is
//! then the running total plus the balance recorded on that pool's last
//! transaction from the address. If no such pool exists the result is the
//! running total over the whole chain.

use poolscan_store::PoolStore;
use poolscan_types::{Address, Amount, Pool};

use crate::chain::ChainWalker;
use crate::QueryError;

/// Outcome of a balance scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceReport {
    /// Integral balance; the fraction is always zero.
    pub amount: Amount,
    /// Pools read before the scan stopped.
    pub pools_visited: u64,
    /// Whether the scan stopped on a pool where the address is a source.
    pub matched_source: bool,
}

/// Sum of the integral amounts of every transaction in the pool,
/// regardless of source or target.
pub fn pool_target_total(pool: &Pool) -> i64 {
    pool.transactions()
        .iter()
        .fold(0i64, |acc, tx| acc.saturating_add(tx.amount().integral()))
}

/// Balance recorded on the last transaction in the pool whose source is
/// `address`, or 0 if there is none.
pub fn pool_source_balance(pool: &Pool, address: &Address) -> i64 {
    pool.last_by_source(address)
        .map(|tx| tx.balance().integral())
        .unwrap_or(0)
}

pub fn accumulate_balance(
    store: &dyn PoolStore,
    address: &Address,
) -> Result<BalanceReport, QueryError> {
    let mut target_total = 0i64;
    let mut pools_visited = 0u64;

    for pool in ChainWalker::from_head(store)? {
        let pool = pool?;
        pools_visited += 1;
        target_total = target_total.saturating_add(pool_target_total(&pool));
        let source_total = pool_source_balance(&pool, address);

        if pool.has_source(address) {
            tracing::debug!(
                %address,
                pools_visited,
                stop_sequence = pool.sequence(),
                "balance scan stopped on source match"
            );
            return Ok(BalanceReport {
                amount: Amount::from_integral(target_total.saturating_add(source_total)),
                pools_visited,
                matched_source: true,
            });
        }
    }

    tracing::debug!(%address, pools_visited, "balance scan exhausted the chain");
    Ok(BalanceReport {
        amount: Amount::from_integral(target_total),
        pools_visited,
        matched_source: false,
    })
}
