//! The command table.
//!
//! Every command the server answers is a variant here with typed request
//! fields. The wire form is a JSON object whose `command` field names the
//! variant, e.g. `{"command": "PoolListGet", "offset": 0, "limit": 10}`.

use serde::{Deserialize, Serialize};

use crate::pagination::{default_limit, PaginationParams};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum RpcCommand {
    BalanceGet {
        address: String,
        #[serde(default)]
        currency: String,
    },
    TransactionGet {
        transaction_id: String,
    },
    TransactionsGet {
        address: String,
        #[serde(default)]
        offset: i64,
        #[serde(default = "default_limit")]
        limit: i64,
    },
    PoolInfoGet {
        hash: String,
        /// Accepted for compatibility; lookups go by hash alone.
        #[serde(default)]
        index: i64,
    },
    PoolTransactionsGet {
        hash: String,
        #[serde(default)]
        index: i64,
        #[serde(default)]
        offset: i64,
        #[serde(default = "default_limit")]
        limit: i64,
    },
    PoolListGet {
        #[serde(default)]
        offset: i64,
        #[serde(default = "default_limit")]
        limit: i64,
    },
    SmartContractGet {
        address: String,
    },
}

impl RpcCommand {
    /// Names of every command, in table order.
    pub const NAMES: [&'static str; 7] = [
        "BalanceGet",
        "TransactionGet",
        "TransactionsGet",
        "PoolInfoGet",
        "PoolTransactionsGet",
        "PoolListGet",
        "SmartContractGet",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RpcCommand::BalanceGet { .. } => Self::NAMES[0],
            RpcCommand::TransactionGet { .. } => Self::NAMES[1],
            RpcCommand::TransactionsGet { .. } => Self::NAMES[2],
            RpcCommand::PoolInfoGet { .. } => Self::NAMES[3],
            RpcCommand::PoolTransactionsGet { .. } => Self::NAMES[4],
            RpcCommand::PoolListGet { .. } => Self::NAMES[5],
            RpcCommand::SmartContractGet { .. } => Self::NAMES[6],
        }
    }

    /// Pagination parameters, for the commands that take them.
    pub fn page(&self) -> Option<PaginationParams> {
        match *self {
            RpcCommand::TransactionsGet { offset, limit, .. }
            | RpcCommand::PoolTransactionsGet { offset, limit, .. }
            | RpcCommand::PoolListGet { offset, limit } => {
                Some(PaginationParams::new(offset, limit))
            }
            _ => None,
        }
    }
}
