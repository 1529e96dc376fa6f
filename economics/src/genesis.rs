//! Mint genesis

use serde::{Deserialize, Serialize};
use skaf_core::ConfigurationError;

use crate::error::Result;
use crate::keeper::MintKeeper;
use crate::minter::Minter;
use crate::params::MintParams;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenesisState {
    pub minter: Minter,
    pub params: MintParams,
}

impl GenesisState {
    pub fn new(minter: Minter, params: MintParams) -> Self {
        Self { minter, params }
    }
}

pub fn validate_genesis(state: &GenesisState) -> std::result::Result<(), ConfigurationError> {
    state.params.validate()?;
    state.minter.validate()
}

pub fn init_genesis(keeper: &MintKeeper, state: &GenesisState) -> Result<()> {
    validate_genesis(state)?;
    keeper.set_minter(&state.minter)?;
    keeper.set_params(&state.params)?;
    keeper.log_initialized(&state.params);
    Ok(())
}

pub fn export_genesis(keeper: &MintKeeper) -> Result<GenesisState> {
    Ok(GenesisState {
        minter: keeper.minter()?,
        params: keeper.params()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skaf_core::Dec;

    #[test]
    fn test_default_genesis_valid() {
        assert!(validate_genesis(&GenesisState::default()).is_ok());
    }

    #[test]
    fn test_minter_inflation_above_one_rejected() {
        let state = GenesisState::new(Minter::initial(Dec::from_int(2u32)), MintParams::default());
        assert!(validate_genesis(&state).is_err());
    }

    #[test]
    fn test_genesis_json_shape() {
        let json = serde_json::to_value(GenesisState::default()).unwrap();
        assert_eq!(json["minter"]["inflation"], "0.005000000000000000");
        assert_eq!(json["minter"]["annual_provisions"], "0.000000000000000000");
        assert_eq!(json["params"]["mint_denom"], "uskaf");

        let back: GenesisState = serde_json::from_value(json).unwrap();
        assert_eq!(back, GenesisState::default());
    }
}
