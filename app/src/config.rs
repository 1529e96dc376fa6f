//! Node configuration
//!
//! Loaded from a TOML file. Every section is optional and falls back to the
//! defaults below.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use skaf_core::constants::BECH32_PREFIX;
use skaf_core::Dec;
use skaf_economics::{FixedStakingInfo, IssuancePolicy};
use skaf_feedist::FeeDistributionConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Pipeline position that performs fee distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStage {
    /// Before message execution, regardless of its outcome
    Ante,
    /// After successful message execution
    #[default]
    Post,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    pub node: NodeSection,
    pub issuance: IssuancePolicy,
    pub staking: StakingSection,
    pub genesis: GenesisSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSection {
    /// Sled database directory; state is kept in memory when unset
    pub data_dir: Option<PathBuf>,
    pub bech32_prefix: String,
    /// Address allowed to change the fee distribution; the `gov` module
    /// account when empty
    pub authority: String,
    pub distribution_stage: DistributionStage,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            data_dir: None,
            bech32_prefix: BECH32_PREFIX.to_string(),
            authority: String::new(),
            distribution_stage: DistributionStage::default(),
        }
    }
}

/// Figures reported by the staking stub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingSection {
    pub bonded_ratio: Dec,
    pub token_supply: u64,
}

impl Default for StakingSection {
    fn default() -> Self {
        Self {
            bonded_ratio: Dec::new_with_prec(67, 2),
            token_supply: 1_000_000,
        }
    }
}

impl StakingSection {
    pub fn staking_info(&self) -> FixedStakingInfo {
        FixedStakingInfo {
            bonded_ratio: self.bonded_ratio.clone(),
            token_supply: BigUint::from(self.token_supply),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisSection {
    pub fee_distribution: FeeDistributionConfig,
    pub mint: skaf_economics::GenesisState,
    pub accounts: Vec<GenesisAccount>,
}

/// Balance credited at genesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenesisAccount {
    pub address: String,
    /// Coin list such as `"1000uskaf,5uatom"`
    pub coins: String,
}

/// Data directory used by `skafd` when the config leaves it unset
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skafd")
}

impl NodeConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: NodeConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.issuance
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.staking.bonded_ratio.gt_one() {
            return Err(ConfigError::Invalid(format!(
                "bonded ratio too large: {}",
                self.staking.bonded_ratio
            )));
        }
        Ok(())
    }
}
