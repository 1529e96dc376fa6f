//! Mint parameters

use serde::{Deserialize, Serialize};
use skaf_core::constants::BASE_DENOM;
use skaf_core::{validate_denom, ConfigurationError, Dec};

use crate::constants::DEFAULT_BLOCKS_PER_YEAR;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MintParams {
    /// Denomination of minted coins
    pub mint_denom: String,
    /// Maximum annual change in inflation rate
    pub inflation_rate_change: Dec,
    pub inflation_max: Dec,
    pub inflation_min: Dec,
    /// Target fraction of supply bonded
    pub goal_bonded: Dec,
    pub blocks_per_year: u64,
}

impl Default for MintParams {
    fn default() -> Self {
        Self {
            mint_denom: BASE_DENOM.to_string(),
            inflation_rate_change: Dec::new_with_prec(5, 3),
            inflation_max: Dec::new_with_prec(5, 3),
            inflation_min: Dec::new_with_prec(5, 3),
            goal_bonded: Dec::new_with_prec(67, 2),
            blocks_per_year: DEFAULT_BLOCKS_PER_YEAR,
        }
    }
}

fn check_fraction(name: &'static str, value: &Dec) -> Result<(), ConfigurationError> {
    if value.gt_one() {
        return Err(ConfigurationError::InvalidParam {
            name,
            reason: format!("too large: {}", value),
        });
    }
    Ok(())
}

impl MintParams {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.mint_denom.trim().is_empty() {
            return Err(ConfigurationError::InvalidParam {
                name: "mint_denom",
                reason: "cannot be blank".to_string(),
            });
        }
        validate_denom(&self.mint_denom)?;

        check_fraction("inflation_rate_change", &self.inflation_rate_change)?;
        check_fraction("inflation_max", &self.inflation_max)?;
        check_fraction("inflation_min", &self.inflation_min)?;
        check_fraction("goal_bonded", &self.goal_bonded)?;
        if self.goal_bonded.is_zero() {
            return Err(ConfigurationError::InvalidParam {
                name: "goal_bonded",
                reason: "must be positive".to_string(),
            });
        }

        if self.blocks_per_year == 0 {
            return Err(ConfigurationError::InvalidParam {
                name: "blocks_per_year",
                reason: "must be positive".to_string(),
            });
        }

        if self.inflation_max < self.inflation_min {
            return Err(ConfigurationError::InvalidParam {
                name: "inflation_max",
                reason: format!(
                    "max inflation ({}) must be greater than or equal to min inflation ({})",
                    self.inflation_max, self.inflation_min
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        let params = MintParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.mint_denom, "uskaf");
        assert_eq!(params.blocks_per_year, 5_259_600);
    }

    #[test]
    fn test_zero_blocks_per_year_rejected() {
        let params = MintParams {
            blocks_per_year: 0,
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidParam {
                name: "blocks_per_year",
                ..
            }
        ));
    }

    #[test]
    fn test_max_below_min_rejected() {
        let params = MintParams {
            inflation_max: Dec::new_with_prec(1, 2),
            inflation_min: Dec::new_with_prec(2, 2),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_fraction_bounds() {
        let params = MintParams {
            inflation_rate_change: Dec::new_with_prec(11, 1),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = MintParams {
            goal_bonded: Dec::zero(),
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = MintParams {
            goal_bonded: Dec::one(),
            inflation_max: Dec::one(),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_bad_denom_rejected() {
        for denom in ["", "  ", "1skaf", "a b"] {
            let params = MintParams {
                mint_denom: denom.to_string(),
                ..Default::default()
            };
            assert!(params.validate().is_err(), "accepted {:?}", denom);
        }
    }

    #[test]
    fn test_json_decimals_are_strings() {
        let json = serde_json::to_value(MintParams::default()).unwrap();
        assert_eq!(json["goal_bonded"], "0.670000000000000000");
        assert_eq!(json["blocks_per_year"], 5_259_600);
    }
}
