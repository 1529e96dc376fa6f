//! Fee distribution error types

use skaf_core::{ConfigurationError, LedgerError, TxError};
use skaf_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeeDistError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Fee collector account not found: {0}")]
    FeeCollectorNotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

pub type Result<T> = std::result::Result<T, FeeDistError>;

impl From<FeeDistError> for TxError {
    fn from(err: FeeDistError) -> Self {
        match err {
            FeeDistError::Configuration(e) => TxError::Configuration(e),
            FeeDistError::Ledger(e) => TxError::Ledger(e),
            FeeDistError::Unauthorized(who) => TxError::Unauthorized(who),
            other => TxError::InvalidRequest(other.to_string()),
        }
    }
}
