//! Fee split arithmetic
//!
//! For every denomination the developer gets `floor(amount * bps / 10000)`
//! and the remainder gets the rest, so no coin is created or lost.

use num_bigint::BigUint;
use skaf_core::constants::BPS_DENOMINATOR;
use skaf_core::{AddressValidator, Coin, CoinBag, ConfigurationError};

use crate::config::FeeDistributionConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeSplit {
    /// Share routed to the developer address
    pub developer: CoinBag,
    /// Share left in the fee collector
    pub remainder: CoinBag,
}

impl FeeSplit {
    /// Everything stays in the fee collector
    pub fn identity(total_fees: &CoinBag) -> Self {
        Self {
            developer: CoinBag::new(),
            remainder: total_fees.clone(),
        }
    }
}

/// Whether `config` takes part in fee splitting.
///
/// `Ok(false)` when disabled; the validation error when enabled but invalid.
pub fn is_active(
    config: &FeeDistributionConfig,
    validator: &dyn AddressValidator,
) -> Result<bool, ConfigurationError> {
    if !config.enabled {
        return Ok(false);
    }
    config.validate(validator)?;
    Ok(true)
}

/// Split `total_fees` under `config`.
///
/// Disabled or invalid configs yield the identity split; this never fails.
pub fn split(
    total_fees: &CoinBag,
    config: &FeeDistributionConfig,
    validator: &dyn AddressValidator,
) -> FeeSplit {
    match is_active(config, validator) {
        Ok(true) if !total_fees.is_empty() => split_by_bps(total_fees, config.developer_fee_bps),
        _ => FeeSplit::identity(total_fees),
    }
}

/// Split without consulting a config. Basis points above 10000 are clamped.
pub fn split_by_bps(total_fees: &CoinBag, developer_bps: u64) -> FeeSplit {
    let bps = BigUint::from(developer_bps.min(BPS_DENOMINATOR));
    let denominator = BigUint::from(BPS_DENOMINATOR);

    let mut out = FeeSplit::default();
    for coin in total_fees.iter() {
        let dev_amount = &coin.amount * &bps / &denominator;
        let rem_amount = &coin.amount - &dev_amount;
        out.developer.add(Coin::new(coin.denom.clone(), dev_amount));
        out.remainder.add(Coin::new(coin.denom, rem_amount));
    }
    out
}
