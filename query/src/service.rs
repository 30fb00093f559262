//! The query operations served to external callers.
//!
//! Inputs arrive as the strings a client sends. Address strings are
//! canonicalized here; hash and id strings that fail to parse are treated
//! the same as identifiers the store does not hold.

use poolscan_crypto::canonicalize_address;
use poolscan_types::{Currency, Pool, PoolHash, Transaction, TransactionId};

use crate::balance::{accumulate_balance, BalanceReport};
use crate::chain::pool_page;
use crate::context::QueryContext;
use crate::contract::{find_smart_contract, SmartContract};
use crate::transactions::{address_history, paginate};
use crate::QueryError;

/// Read-only query service bound to one [`QueryContext`].
#[derive(Clone, Debug)]
pub struct QueryService {
    ctx: QueryContext,
}

impl QueryService {
    pub fn new(ctx: QueryContext) -> Self {
        Self { ctx }
    }

    /// Balance of `address`. The currency is carried as a label only.
    pub fn balance(&self, address: &str, currency: &Currency) -> Result<BalanceReport, QueryError> {
        let key = canonicalize_address(address);
        let report = accumulate_balance(self.ctx.store(), &key)?;
        tracing::debug!(
            %key,
            %currency,
            balance = %report.amount,
            pools_visited = report.pools_visited,
            "balance computed"
        );
        Ok(report)
    }

    /// A single transaction by its `<pool hash>.<index>` id.
    pub fn transaction(&self, id: &str) -> Result<Option<Transaction>, QueryError> {
        let Ok(id) = id.parse::<TransactionId>() else {
            tracing::debug!(id, "malformed transaction id");
            return Ok(None);
        };
        let Some(pool) = self.ctx.store().load_pool(id.pool_hash())? else {
            return Ok(None);
        };
        Ok(pool.transaction(id.index() as usize).cloned())
    }

    /// Transactions involving `address`, newest first.
    pub fn address_transactions(
        &self,
        address: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Transaction>, QueryError> {
        let key = canonicalize_address(address);
        address_history(self.ctx.store(), &key, offset, limit)
    }

    /// A pool by hash string.
    pub fn pool_info(&self, hash: &str) -> Result<Option<Pool>, QueryError> {
        match hash.parse::<PoolHash>() {
            Ok(hash) => Ok(self.ctx.store().load_pool(&hash)?),
            Err(e) => {
                tracing::debug!(error = %e, "malformed pool hash");
                Ok(None)
            }
        }
    }

    /// A page of one pool's transactions. Unknown pools yield an empty page.
    pub fn pool_transactions(
        &self,
        hash: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Transaction>, QueryError> {
        Ok(self
            .pool_info(hash)?
            .map(|pool| paginate(&pool, offset, limit).to_vec())
            .unwrap_or_default())
    }

    /// A page of pools walking back from the head.
    pub fn pool_list(&self, offset: usize, limit: usize) -> Result<Vec<Pool>, QueryError> {
        pool_page(self.ctx.store(), offset, limit)
    }

    /// The placeholder contract record for `address`, if it has contract data.
    pub fn smart_contract(&self, address: &str) -> Result<Option<SmartContract>, QueryError> {
        let key = canonicalize_address(address);
        find_smart_contract(self.ctx.store(), &key)
    }
}
