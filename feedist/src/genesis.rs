//! Fee distribution genesis

use log::info;
use serde::{Deserialize, Serialize};
use skaf_core::{AddressValidator, ConfigurationError};

use crate::config::ModuleConfig;
use crate::error::Result;
use crate::keeper::{FeeDistKeeper, LOG_TARGET};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    #[serde(default)]
    pub config: ModuleConfig,
}

impl GenesisState {
    pub fn validate(
        &self,
        validator: &dyn AddressValidator,
    ) -> std::result::Result<(), ConfigurationError> {
        self.config.validate(validator)
    }
}

pub fn init_genesis(keeper: &FeeDistKeeper, state: &GenesisState) -> Result<()> {
    keeper.set_config(&state.config)?;
    info!(
        target: LOG_TARGET,
        "fee distribution initialized (enabled={})",
        state.config.fee_distribution.enabled
    );
    Ok(())
}

pub fn export_genesis(keeper: &FeeDistKeeper) -> Result<GenesisState> {
    Ok(GenesisState {
        config: keeper.config()?,
    })
}
