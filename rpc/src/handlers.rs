//! Response shapes and conversion from ledger types.

use serde::{Deserialize, Serialize};

use poolscan_query::SmartContract;
use poolscan_types::{Amount, Pool, Transaction};

// ── Shared shapes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountDto {
    pub integral: i64,
    pub fraction: i64,
}

impl From<Amount> for AmountDto {
    fn from(amount: Amount) -> Self {
        let fraction = i64::try_from(amount.fraction()).unwrap_or(i64::MAX);
        debug_assert!(fraction >= 0);
        Self {
            integral: amount.integral(),
            fraction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDto {
    pub amount: AmountDto,
    pub currency: String,
    pub inner_id: String,
    pub source: String,
    pub target: String,
}

impl From<&Transaction> for TransactionDto {
    fn from(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount().into(),
            currency: tx.currency().to_string(),
            inner_id: tx.id().to_string(),
            source: tx.source().to_string(),
            target: tx.target().to_string(),
        }
    }
}

pub fn convert_transactions(transactions: &[Transaction]) -> Vec<TransactionDto> {
    transactions.iter().map(TransactionDto::from).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolDto {
    pub hash: String,
    pub pool_number: u64,
    pub prev_hash: String,
    pub transactions_count: u64,
}

impl From<&Pool> for PoolDto {
    fn from(pool: &Pool) -> Self {
        Self {
            hash: pool.hash().to_string(),
            pool_number: pool.sequence(),
            prev_hash: pool.previous_hash().to_string(),
            transactions_count: pool.transaction_count() as u64,
        }
    }
}

// ── Balance ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceGetResult {
    pub amount: AmountDto,
}

// ── Transactions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionGetResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<TransactionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsGetResult {
    pub transactions: Vec<TransactionDto>,
}

// ── Pools ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolInfoGetResult {
    pub is_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolTransactionsGetResult {
    pub transactions: Vec<TransactionDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolListGetResult {
    pub pools: Vec<PoolDto>,
}

// ── Smart contracts ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartContractDto {
    pub source_code: String,
    pub byte_code: String,
    pub hash_state: String,
}

impl From<SmartContract> for SmartContractDto {
    fn from(contract: SmartContract) -> Self {
        Self {
            source_code: contract.source_code,
            byte_code: contract.byte_code,
            hash_state: contract.hash_state,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmartContractGetResult {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smart_contract: Option<SmartContractDto>,
}
