//! Smart-contract record lookup.
//!
//! Contracts are not executed. The most recent transaction sent from the
//! contract address carries its data in user field
//! [`SMART_CONTRACT_FIELD`]; when that data is present a placeholder record
//! is returned.

use serde::Serialize;

use poolscan_store::PoolStore;
use poolscan_types::{Address, UserField, SMART_CONTRACT_FIELD};

use crate::chain::ChainWalker;
use crate::QueryError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SmartContract {
    pub source_code: String,
    pub byte_code: String,
    pub hash_state: String,
}

impl SmartContract {
    /// Decode contract data. The format is not defined yet, so every
    /// non-empty payload maps to the same canned record.
    pub fn from_data(_data: &str) -> Self {
        Self {
            source_code: "test_source_code".to_string(),
            byte_code: "test_byte_code".to_string(),
            hash_state: "test_hash_state".to_string(),
        }
    }
}

/// Find the contract record for `address`.
///
/// `None` when the address never appears as a source, or when its most
/// recent transaction has no text in the contract field (or an empty one).
pub fn find_smart_contract(
    store: &dyn PoolStore,
    address: &Address,
) -> Result<Option<SmartContract>, QueryError> {
    for pool in ChainWalker::from_head(store)? {
        let pool = pool?;
        let Some(tx) = pool.last_by_source(address) else {
            continue;
        };
        let data = tx
            .user_field(SMART_CONTRACT_FIELD)
            .and_then(UserField::as_text)
            .filter(|data| !data.is_empty());
        return Ok(match data {
            Some(data) => Some(SmartContract::from_data(data)),
            None => {
                tracing::debug!(
                    %address,
                    tx = %tx.id(),
                    "latest transaction carries no contract data"
                );
                None
            }
        });
    }
    Ok(None)
}
