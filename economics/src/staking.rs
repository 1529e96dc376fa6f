//! Staking capability consumed by the mint module

use num_bigint::BigUint;
use skaf_core::Dec;

pub trait StakingInfo: Send + Sync {
    /// Fraction of the staking token supply that is bonded
    fn bonded_ratio(&self) -> Dec;

    fn staking_token_supply(&self) -> BigUint;
}

/// Staking view that reports constant figures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedStakingInfo {
    pub bonded_ratio: Dec,
    pub token_supply: BigUint,
}

impl Default for FixedStakingInfo {
    fn default() -> Self {
        Self {
            bonded_ratio: Dec::new_with_prec(67, 2),
            token_supply: BigUint::from(1_000_000u64),
        }
    }
}

impl StakingInfo for FixedStakingInfo {
    fn bonded_ratio(&self) -> Dec {
        self.bonded_ratio.clone()
    }

    fn staking_token_supply(&self) -> BigUint {
        self.token_supply.clone()
    }
}
