//! Fee distribution keeper
//!
//! Owns the module config record and moves the developer share out of the
//! fee collector. Config mutations re-validate the whole record and write
//! nothing on failure.

use log::{error, info};
use skaf_core::constants::FEE_COLLECTOR_NAME;
use skaf_core::{AddressValidator, CoinBag, ConfigurationError, Context, Event, Ledger};
use skaf_storage::{load_record, save_record, KvStore};
use std::sync::Arc;

use crate::config::{FeeDistributionConfig, ModuleConfig};
use crate::constants::*;
use crate::error::{FeeDistError, Result};
use crate::policy::{self, FeeSplit};

pub(crate) const LOG_TARGET: &str = "x/feedist";

pub struct FeeDistKeeper {
    store: Arc<dyn KvStore>,
    ledger: Arc<dyn Ledger>,
    validator: Arc<dyn AddressValidator>,
    fee_collector_name: String,
}

impl FeeDistKeeper {
    pub fn new(
        store: Arc<dyn KvStore>,
        ledger: Arc<dyn Ledger>,
        validator: Arc<dyn AddressValidator>,
    ) -> Self {
        Self {
            store,
            ledger,
            validator,
            fee_collector_name: FEE_COLLECTOR_NAME.to_string(),
        }
    }

    pub fn with_fee_collector(mut self, name: impl Into<String>) -> Self {
        self.fee_collector_name = name.into();
        self
    }

    pub fn address_validator(&self) -> &dyn AddressValidator {
        self.validator.as_ref()
    }

    pub fn fee_collector_name(&self) -> &str {
        &self.fee_collector_name
    }

    /// Stored module config, or the defaults if none was written yet
    pub fn config(&self) -> Result<ModuleConfig> {
        let stored = load_record(self.store.as_ref(), CONFIG_KEY, RECORD_VERSION)?;
        Ok(stored.unwrap_or_default())
    }

    /// Validate and persist a whole module config
    pub fn set_config(&self, config: &ModuleConfig) -> Result<()> {
        config.validate(self.address_validator())?;
        save_record(self.store.as_ref(), CONFIG_KEY, RECORD_VERSION, config)?;
        Ok(())
    }

    pub fn fee_distribution_config(&self) -> Result<FeeDistributionConfig> {
        Ok(self.config()?.fee_distribution)
    }

    pub fn set_developer_address(&self, ctx: &mut Context, address: &str) -> Result<()> {
        self.validator
            .parse(address)
            .map_err(|e| ConfigurationError::InvalidAddress(e.to_string()))?;

        let mut config = self.config()?;
        config.fee_distribution.developer_address = address.to_string();
        self.set_config(&config)?;

        info!(target: LOG_TARGET, "Developer address updated: {}", address);
        ctx.emit(Event::new(EVENT_DEVELOPER_ADDRESS_UPDATED).with_attribute("new_address", address));
        Ok(())
    }

    pub fn set_enabled(&self, ctx: &mut Context, enabled: bool) -> Result<()> {
        let mut config = self.config()?;
        config.fee_distribution.enabled = enabled;
        self.set_config(&config)?;

        info!(target: LOG_TARGET, "Fee distribution status updated: enabled={}", enabled);
        ctx.emit(Event::new(EVENT_STATUS_UPDATED).with_attribute("enabled", enabled));
        Ok(())
    }

    /// Move the developer share of `total_fees` out of the fee collector.
    ///
    /// Disabled or invalid configs distribute nothing and succeed. Once a
    /// split is computed the `fee_distribution` summary is always emitted,
    /// even if the transfer to the developer then fails.
    pub fn distribute_fees(&self, ctx: &mut Context, total_fees: &CoinBag) -> Result<FeeSplit> {
        if total_fees.is_empty() {
            return Ok(FeeSplit::identity(total_fees));
        }

        let config = self.fee_distribution_config()?;
        match policy::is_active(&config, self.address_validator()) {
            Ok(true) => {}
            Ok(false) => return Ok(FeeSplit::identity(total_fees)),
            Err(e) => {
                error!(target: LOG_TARGET, "Invalid fee distribution configuration: {}", e);
                return Ok(FeeSplit::identity(total_fees));
            }
        }

        if self.ledger.module_address(&self.fee_collector_name).is_none() {
            return Err(FeeDistError::FeeCollectorNotFound(
                self.fee_collector_name.clone(),
            ));
        }

        let split = policy::split(total_fees, &config, self.address_validator());
        info!(
            target: LOG_TARGET,
            "Distributing transaction fees: total={} developer={} validator={} developer_address={}",
            total_fees,
            split.developer,
            split.remainder,
            config.developer_address
        );

        let transfer = if split.developer.is_empty() {
            Ok(())
        } else {
            self.send_developer_share(ctx, &config, &split.developer)
        };

        ctx.emit(
            Event::new(EVENT_FEE_DISTRIBUTION)
                .with_attribute("total_fees", total_fees)
                .with_attribute("developer_fee", &split.developer)
                .with_attribute("validator_fee", &split.remainder)
                .with_attribute("developer_percentage", config.developer_fee_bps)
                .with_attribute("validator_percentage", config.validator_fee_bps),
        );

        transfer.map(|()| split)
    }

    fn send_developer_share(
        &self,
        ctx: &mut Context,
        config: &FeeDistributionConfig,
        share: &CoinBag,
    ) -> Result<()> {
        let developer = self
            .validator
            .parse(&config.developer_address)
            .map_err(|e| ConfigurationError::InvalidAddress(e.to_string()))?;

        self.ledger
            .send_from_module(&self.fee_collector_name, &developer, share)?;

        info!(
            target: LOG_TARGET,
            "Developer fee sent: amount={} recipient={}", share, developer
        );
        ctx.emit(
            Event::new(EVENT_DEVELOPER_FEE_DISTRIBUTION)
                .with_attribute("developer_address", &developer)
                .with_attribute("amount", share)
                .with_attribute("percentage", config.developer_fee_bps),
        );
        Ok(())
    }
}
