//! Fee distribution configuration

use serde::{Deserialize, Serialize};
use skaf_core::constants::BPS_DENOMINATOR;
use skaf_core::{AddressValidator, ConfigurationError};

use crate::constants::{DEFAULT_DEVELOPER_FEE_BPS, DEFAULT_VALIDATOR_FEE_BPS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeDistributionConfig {
    /// Receives the developer share
    pub developer_address: String,
    /// Developer share in basis points
    pub developer_fee_bps: u64,
    /// Validator share in basis points
    pub validator_fee_bps: u64,
    pub enabled: bool,
}

impl Default for FeeDistributionConfig {
    /// Disabled until an authority sets a developer address
    fn default() -> Self {
        Self {
            developer_address: String::new(),
            developer_fee_bps: DEFAULT_DEVELOPER_FEE_BPS,
            validator_fee_bps: DEFAULT_VALIDATOR_FEE_BPS,
            enabled: false,
        }
    }
}

impl FeeDistributionConfig {
    /// Check the configuration.
    ///
    /// Basis points are always range checked. An enabled config additionally
    /// needs a parseable developer address and shares summing to 100%.
    pub fn validate(&self, validator: &dyn AddressValidator) -> Result<(), ConfigurationError> {
        for bps in [self.developer_fee_bps, self.validator_fee_bps] {
            if bps > BPS_DENOMINATOR {
                return Err(ConfigurationError::BasisPointsOutOfRange(bps));
            }
        }

        if !self.enabled {
            return Ok(());
        }

        if self.developer_address.is_empty() {
            return Err(ConfigurationError::EmptyDeveloperAddress);
        }
        validator
            .parse(&self.developer_address)
            .map_err(|e| ConfigurationError::InvalidAddress(e.to_string()))?;

        let total = self.developer_fee_bps + self.validator_fee_bps;
        if total != BPS_DENOMINATOR {
            return Err(ConfigurationError::PercentageSum(total));
        }

        Ok(())
    }
}

/// Module configuration record; fee distribution is one section of it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    #[serde(default)]
    pub fee_distribution: FeeDistributionConfig,
}

impl ModuleConfig {
    pub fn validate(&self, validator: &dyn AddressValidator) -> Result<(), ConfigurationError> {
        self.fee_distribution.validate(validator)
    }
}
