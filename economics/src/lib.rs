//! SKAF Economics Module
//!
//! Per-block currency issuance:
//! - Fixed block provision minted to the fee collector
//! - Informational inflation and annual-provision figures
//! - Mint parameters and genesis handling

pub mod error;
pub mod genesis;
pub mod keeper;
pub mod minter;
pub mod params;
pub mod staking;

pub use error::{MintError, Result};
pub use genesis::{export_genesis, init_genesis, validate_genesis, GenesisState};
pub use keeper::MintKeeper;
pub use minter::{IssuancePolicy, Minter};
pub use params::MintParams;
pub use staking::{FixedStakingInfo, StakingInfo};

/// Mint module constants
pub mod constants {
    pub use skaf_core::constants::MINT_MODULE_NAME as MODULE_NAME;

    /// Store key of the minter record
    pub const MINTER_KEY: &[u8] = &[0x00];

    /// Store key of the params record
    pub const PARAMS_KEY: &[u8] = &[0x01];

    /// Layout version of persisted mint records
    pub const RECORD_VERSION: u8 = 1;

    /// Fixed reward per block (1 SKAF)
    pub const DEFAULT_BLOCK_REWARD: u64 = 1_000_000;

    /// Expected blocks per year at 6-second blocks
    pub const DEFAULT_BLOCKS_PER_YEAR: u64 = 5_259_600;

    /// Event type and attribute keys
    pub const EVENT_TYPE_MINT: &str = "mint";
    pub const ATTRIBUTE_KEY_BONDED_RATIO: &str = "bonded_ratio";
    pub const ATTRIBUTE_KEY_INFLATION: &str = "inflation";
    pub const ATTRIBUTE_KEY_ANNUAL_PROVISIONS: &str = "annual_provisions";
    pub const ATTRIBUTE_KEY_AMOUNT: &str = "amount";
}
