//! Transactions and their identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::{Address, Amount, PoolHash, TypesError};

/// User field slot that carries smart-contract data.
pub const SMART_CONTRACT_FIELD: u32 = 0;

/// A transaction id: the owning pool's hash plus the position in that pool.
///
/// String form is `<pool hash hex>.<index>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    pool_hash: PoolHash,
    index: u32,
}

impl TransactionId {
    pub fn new(pool_hash: PoolHash, index: u32) -> Self {
        Self { pool_hash, index }
    }

    pub fn pool_hash(&self) -> &PoolHash {
        &self.pool_hash
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.pool_hash, self.index)
    }
}

impl FromStr for TransactionId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidTransactionId(s.to_string());
        let (hash, index) = s.trim().split_once('.').ok_or_else(invalid)?;
        let pool_hash = hash.parse::<PoolHash>().map_err(|_| invalid())?;
        let index = index.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self { pool_hash, index })
    }
}

/// Opaque currency label. Never converted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Application-defined value attached to a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserField {
    Integer(i64),
    Text(String),
    Amount(Amount),
}

impl UserField {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// An immutable value transfer, owned by exactly one pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    source: Address,
    target: Address,
    amount: Amount,
    currency: Currency,
    /// The source's balance recorded after this transaction.
    balance: Amount,
    #[serde(default)]
    user_fields: BTreeMap<u32, UserField>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        source: Address,
        target: Address,
        amount: Amount,
        currency: Currency,
        balance: Amount,
    ) -> Self {
        Self {
            id,
            source,
            target,
            amount,
            currency,
            balance,
            user_fields: BTreeMap::new(),
        }
    }

    pub fn with_user_field(mut self, id: u32, field: UserField) -> Self {
        self.user_fields.insert(id, field);
        self
    }

    /// Re-home the transaction at a position in a sealed pool.
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn source(&self) -> &Address {
        &self.source
    }

    pub fn target(&self) -> &Address {
        &self.target
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn user_field(&self, id: u32) -> Option<&UserField> {
        self.user_fields.get(&id)
    }

    pub fn user_fields(&self) -> &BTreeMap<u32, UserField> {
        &self.user_fields
    }

    /// Whether `address` is the source or the target.
    pub fn involves(&self, address: &Address) -> bool {
        &self.source == address || &self.target == address
    }
}
