//! Parsing errors for externally supplied identifiers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid pool hash: {0}")]
    InvalidHash(String),

    #[error("invalid transaction id: {0}")]
    InvalidTransactionId(String),
}
