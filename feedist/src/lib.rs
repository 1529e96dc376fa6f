//! SKAF Fee Distribution Module
//!
//! Splits every transaction fee between a configured developer address and
//! the validator reward pool:
//! - Developer share leaves the fee collector through the ledger
//! - Remainder stays in the fee collector for validators
//!
//! The split is configured by privileged messages and never fails the
//! transaction that paid the fee.

pub mod ante;
pub mod config;
pub mod error;
pub mod genesis;
pub mod keeper;
pub mod msgs;
pub mod policy;

pub use ante::{FeeDistributionDecorator, FeeDistributionPostHandler};
pub use config::{FeeDistributionConfig, ModuleConfig};
pub use error::{FeeDistError, Result};
pub use genesis::{export_genesis, init_genesis, GenesisState};
pub use keeper::FeeDistKeeper;
pub use msgs::{MsgEnableFeeDistribution, MsgServer, MsgSetDeveloperAddress};
pub use policy::{is_active, split, split_by_bps, FeeSplit};

/// Fee distribution constants
pub mod constants {
    pub const MODULE_NAME: &str = "feedist";

    /// Store key of the module config record
    pub const CONFIG_KEY: &[u8] = &[0x01];

    /// Layout version of the persisted config record
    pub const RECORD_VERSION: u8 = 1;

    /// Default developer share (10%)
    pub const DEFAULT_DEVELOPER_FEE_BPS: u64 = 1_000;

    /// Default validator share (90%)
    pub const DEFAULT_VALIDATOR_FEE_BPS: u64 = 9_000;

    pub const EVENT_DEVELOPER_FEE_DISTRIBUTION: &str = "developer_fee_distribution";
    pub const EVENT_FEE_DISTRIBUTION: &str = "fee_distribution";
    pub const EVENT_DEVELOPER_ADDRESS_UPDATED: &str = "developer_address_updated";
    pub const EVENT_STATUS_UPDATED: &str = "fee_distribution_status_updated";
    pub const EVENT_DEVELOPER_ADDRESS_SET: &str = "developer_address_set";
    pub const EVENT_FEE_DISTRIBUTION_ENABLED: &str = "fee_distribution_enabled";
}

#[cfg(test)]
mod tests {
    use super::*;
    use skaf_core::constants::BPS_DENOMINATOR;

    #[test]
    fn test_module_constants() {
        assert_eq!(
            constants::DEFAULT_DEVELOPER_FEE_BPS + constants::DEFAULT_VALIDATOR_FEE_BPS,
            BPS_DENOMINATOR
        );
        assert_eq!(constants::CONFIG_KEY, &[0x01]);
    }
}
