//! Command dispatch.
//!
//! The dispatcher is built once from an open store and maps each
//! [`RpcCommand`] to its typed handler. There is no dispatcher, and so no
//! command, without an open store.

use std::sync::Arc;

use tracing::info_span;

use poolscan_query::{QueryContext, QueryService};
use poolscan_store::PoolStore;
use poolscan_types::Currency;

use crate::commands::RpcCommand;
use crate::handlers::{
    convert_transactions, BalanceGetResult, PoolDto, PoolInfoGetResult, PoolListGetResult,
    PoolTransactionsGetResult, SmartContractGetResult, TransactionDto, TransactionGetResult,
    TransactionsGetResult,
};
use crate::pagination::{PaginationParams, MAX_PAGE_SIZE};
use crate::RpcError;

pub struct RpcDispatcher {
    service: QueryService,
    max_page_size: usize,
}

impl RpcDispatcher {
    /// Build the dispatcher over `store`. Fails with the store's last error
    /// message if it is not open.
    pub fn init(store: Arc<dyn PoolStore>) -> Result<Self, RpcError> {
        let ctx = QueryContext::new(store)?;
        let dispatcher = Self::new(ctx);
        tracing::info!(commands = ?dispatcher.commands(), "registered RPC commands");
        Ok(dispatcher)
    }

    pub fn new(ctx: QueryContext) -> Self {
        Self {
            service: QueryService::new(ctx),
            max_page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_max_page_size(mut self, max_page_size: usize) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Names of the commands this dispatcher answers.
    pub fn commands(&self) -> &'static [&'static str] {
        &RpcCommand::NAMES
    }

    /// Run one command and serialise its response.
    pub fn dispatch(&self, command: RpcCommand) -> Result<serde_json::Value, RpcError> {
        let _span = info_span!("rpc", command = command.name()).entered();
        let page = command.page().unwrap_or_default();

        let response = match command {
            RpcCommand::BalanceGet { address, currency } => {
                serde_json::to_value(self.balance_get(&address, &currency)?)?
            }
            RpcCommand::TransactionGet { transaction_id } => {
                serde_json::to_value(self.transaction_get(&transaction_id)?)?
            }
            RpcCommand::TransactionsGet { address, .. } => {
                serde_json::to_value(self.transactions_get(&address, page)?)?
            }
            RpcCommand::PoolInfoGet { hash, .. } => {
                serde_json::to_value(self.pool_info_get(&hash)?)?
            }
            RpcCommand::PoolTransactionsGet { hash, .. } => {
                serde_json::to_value(self.pool_transactions_get(&hash, page)?)?
            }
            RpcCommand::PoolListGet { .. } => serde_json::to_value(self.pool_list_get(page)?)?,
            RpcCommand::SmartContractGet { address } => {
                serde_json::to_value(self.smart_contract_get(&address)?)?
            }
        };
        Ok(response)
    }

    pub fn balance_get(&self, address: &str, currency: &str) -> Result<BalanceGetResult, RpcError> {
        let report = self.service.balance(address, &Currency::new(currency))?;
        Ok(BalanceGetResult {
            amount: report.amount.into(),
        })
    }

    pub fn transaction_get(&self, transaction_id: &str) -> Result<TransactionGetResult, RpcError> {
        let transaction = self.service.transaction(transaction_id)?;
        Ok(TransactionGetResult {
            found: transaction.is_some(),
            transaction: transaction.as_ref().map(TransactionDto::from),
        })
    }

    pub fn transactions_get(
        &self,
        address: &str,
        page: PaginationParams,
    ) -> Result<TransactionsGetResult, RpcError> {
        let transactions = self.service.address_transactions(
            address,
            page.effective_offset(),
            page.effective_limit(self.max_page_size),
        )?;
        Ok(TransactionsGetResult {
            transactions: convert_transactions(&transactions),
        })
    }

    pub fn pool_info_get(&self, hash: &str) -> Result<PoolInfoGetResult, RpcError> {
        let pool = self.service.pool_info(hash)?;
        Ok(PoolInfoGetResult {
            is_found: pool.is_some(),
            pool: pool.as_ref().map(PoolDto::from),
        })
    }

    pub fn pool_transactions_get(
        &self,
        hash: &str,
        page: PaginationParams,
    ) -> Result<PoolTransactionsGetResult, RpcError> {
        let transactions = self.service.pool_transactions(
            hash,
            page.effective_offset(),
            page.effective_limit(self.max_page_size),
        )?;
        Ok(PoolTransactionsGetResult {
            transactions: convert_transactions(&transactions),
        })
    }

    pub fn pool_list_get(&self, page: PaginationParams) -> Result<PoolListGetResult, RpcError> {
        let pools = self.service.pool_list(
            page.effective_offset(),
            page.effective_limit(self.max_page_size),
        )?;
        Ok(PoolListGetResult {
            pools: pools.iter().map(PoolDto::from).collect(),
        })
    }

    pub fn smart_contract_get(&self, address: &str) -> Result<SmartContractGetResult, RpcError> {
        let contract = self.service.smart_contract(address)?;
        Ok(SmartContractGetResult {
            found: contract.is_some(),
            smart_contract: contract.map(Into::into),
        })
    }
}
