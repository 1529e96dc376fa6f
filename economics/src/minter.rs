//! Minter state and issuance policy

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use skaf_core::{Coin, ConfigurationError, Dec};

use crate::constants::DEFAULT_BLOCK_REWARD;
use crate::params::MintParams;

/// Informational inflation figures, recomputed every block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Minter {
    /// Current annual inflation rate
    pub inflation: Dec,
    /// Expected provisions over the next year
    pub annual_provisions: Dec,
}

impl Minter {
    pub fn new(inflation: Dec, annual_provisions: Dec) -> Self {
        Self {
            inflation,
            annual_provisions,
        }
    }

    /// Minter with the given inflation and no provisions yet
    pub fn initial(inflation: Dec) -> Self {
        Self::new(inflation, Dec::zero())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.inflation.gt_one() {
            return Err(ConfigurationError::InvalidParam {
                name: "inflation",
                reason: format!("too large: {}", self.inflation),
            });
        }
        Ok(())
    }
}

impl Default for Minter {
    fn default() -> Self {
        Self::initial(Dec::new_with_prec(5, 3))
    }
}

/// How much currency is issued per block.
///
/// Issuance is a fixed amount per block. The percentage inflation model is
/// still computed every block, but only for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuancePolicy {
    /// Smallest units minted per block
    pub block_reward: u64,
    /// Reported annual inflation rate
    pub fixed_inflation: Dec,
}

impl Default for IssuancePolicy {
    fn default() -> Self {
        Self {
            block_reward: DEFAULT_BLOCK_REWARD,
            fixed_inflation: Dec::new_with_prec(5, 3),
        }
    }
}

impl IssuancePolicy {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.fixed_inflation.gt_one() {
            return Err(ConfigurationError::InvalidParam {
                name: "fixed_inflation",
                reason: format!("too large: {}", self.fixed_inflation),
            });
        }
        Ok(())
    }

    /// Coin minted for one block, independent of inflation and bonded ratio
    pub fn block_provision(&self, params: &MintParams) -> Coin {
        Coin::new(params.mint_denom.clone(), self.block_reward)
    }

    pub fn next_inflation_rate(&self, _params: &MintParams, _bonded_ratio: &Dec) -> Dec {
        self.fixed_inflation.clone()
    }

    pub fn next_annual_provisions(&self, inflation: &Dec, total_supply: &BigUint) -> Dec {
        inflation.mul_int(total_supply)
    }
}
