//! SKAF Application
//!
//! Wires the fee distribution and mint modules to a store, a ledger and the
//! transaction pipeline.

pub mod ante;
pub mod app;
pub mod config;
pub mod tx;

pub use ante::DeductFeeDecorator;
pub use app::{AppError, AppGenesis, AppStatus, SkafApp, TxResult};
pub use config::{ConfigError, DistributionStage, GenesisAccount, NodeConfig};
pub use tx::{AppMsg, AppTx};

pub mod constants {
    /// Default holder of the module authority
    pub const GOV_MODULE_NAME: &str = "gov";

    /// Store namespaces of the modules
    pub const FEEDIST_STORE_PREFIX: &[u8] = b"feedist/";
    pub const MINT_STORE_PREFIX: &[u8] = b"mint/";
}
