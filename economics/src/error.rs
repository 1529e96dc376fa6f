use skaf_core::{ConfigurationError, LedgerError};
use skaf_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MintError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Mint state not initialized: {0} missing")]
    NotInitialized(&'static str),
}

pub type Result<T> = std::result::Result<T, MintError>;
