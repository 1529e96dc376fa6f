//! Shared error taxonomy

use thiserror::Error;

/// Invalid configuration or parameters.
///
/// Returned to privileged callers when a mutation would leave the module in an
/// invalid state. On the per-transaction path it is never surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Developer address cannot be empty when fee distribution is enabled")]
    EmptyDeveloperAddress,

    #[error("Fee percentages must add up to 10000 (100%), got {0}")]
    PercentageSum(u64),

    #[error("Basis points out of range [0, 10000]: {0}")]
    BasisPointsOutOfRange(u64),

    #[error("Invalid denomination: {0}")]
    InvalidDenom(String),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },
}

/// Failures reported by the ledger capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: String, available: String },

    #[error("Module account not found: {0}")]
    UnknownModuleAccount(String),

    #[error("Invalid coins: {0}")]
    InvalidCoins(String),
}

/// Errors that cross the transaction pipeline boundary
#[derive(Error, Debug)]
pub enum TxError {
    #[error("Malformed transaction: {0}")]
    MalformedTransaction(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, TxError>;
