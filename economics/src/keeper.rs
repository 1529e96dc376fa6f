//! Mint keeper
//!
//! Owns the minter and params records in the module store and drives the
//! per-block issuance through the ledger capability.

use log::{debug, info};
use num_bigint::BigUint;
use skaf_core::constants::FEE_COLLECTOR_NAME;
use skaf_core::{Address, Coin, CoinBag, Context, Dec, Event, Ledger, LedgerError};
use skaf_storage::{load_record, save_record, KvStore};
use std::sync::Arc;

use crate::constants::*;
use crate::error::{MintError, Result};
use crate::minter::{IssuancePolicy, Minter};
use crate::params::MintParams;
use crate::staking::StakingInfo;

const LOG_TARGET: &str = "x/mint";

pub struct MintKeeper {
    store: Arc<dyn KvStore>,
    ledger: Arc<dyn Ledger>,
    staking: Arc<dyn StakingInfo>,
    policy: IssuancePolicy,
    fee_collector_name: String,
}

impl MintKeeper {
    pub fn new(
        store: Arc<dyn KvStore>,
        ledger: Arc<dyn Ledger>,
        staking: Arc<dyn StakingInfo>,
        policy: IssuancePolicy,
    ) -> Self {
        Self {
            store,
            ledger,
            staking,
            policy,
            fee_collector_name: FEE_COLLECTOR_NAME.to_string(),
        }
    }

    /// Route minted coins to a different module account
    pub fn with_fee_collector(mut self, name: impl Into<String>) -> Self {
        self.fee_collector_name = name.into();
        self
    }

    pub fn policy(&self) -> &IssuancePolicy {
        &self.policy
    }

    pub fn params(&self) -> Result<MintParams> {
        load_record(self.store.as_ref(), PARAMS_KEY, RECORD_VERSION)?
            .ok_or(MintError::NotInitialized("params"))
    }

    /// Validate and persist params
    pub fn set_params(&self, params: &MintParams) -> Result<()> {
        params.validate()?;
        save_record(self.store.as_ref(), PARAMS_KEY, RECORD_VERSION, params)?;
        Ok(())
    }

    pub fn minter(&self) -> Result<Minter> {
        load_record(self.store.as_ref(), MINTER_KEY, RECORD_VERSION)?
            .ok_or(MintError::NotInitialized("minter"))
    }

    pub fn set_minter(&self, minter: &Minter) -> Result<()> {
        save_record(self.store.as_ref(), MINTER_KEY, RECORD_VERSION, minter)?;
        Ok(())
    }

    /// Mint into the mint module account; empty bags are skipped
    pub fn mint_coins(&self, coins: &CoinBag) -> Result<()> {
        if coins.is_empty() {
            return Ok(());
        }
        self.ledger.mint(MODULE_NAME, coins)?;
        Ok(())
    }

    /// Move coins from the mint module account to the fee collector
    pub fn add_collected_fees(&self, coins: &CoinBag) -> Result<()> {
        let collector = self.fee_collector()?;
        self.ledger.send_from_module(MODULE_NAME, &collector, coins)?;
        Ok(())
    }

    fn fee_collector(&self) -> Result<Address> {
        let collector = self
            .ledger
            .module_address(&self.fee_collector_name)
            .ok_or_else(|| LedgerError::UnknownModuleAccount(self.fee_collector_name.clone()))?;
        Ok(collector)
    }

    /// Block provision under the stored params
    pub fn block_provision(&self) -> Result<Coin> {
        Ok(self.policy.block_provision(&self.params()?))
    }

    /// `floor(coin.amount * ratio)` in the same denomination
    pub fn get_proportions(&self, coin: &Coin, ratio: &Dec) -> Coin {
        let amount: BigUint = Dec::from_int(coin.amount.clone()).mul(ratio).truncate_int();
        Coin::new(coin.denom.clone(), amount)
    }

    /// Per-block issuance.
    ///
    /// Recomputes the informational minter, mints the fixed block provision
    /// and hands it to the fee collector. The collector is resolved before
    /// anything is written, and the minter is stored only once the provision
    /// has reached it.
    pub fn begin_block(&self, ctx: &mut Context) -> Result<Coin> {
        let params = self.params()?;
        let mut minter = self.minter()?;
        let collector = self.fee_collector()?;

        let bonded_ratio = self.staking.bonded_ratio();
        minter.inflation = self.policy.next_inflation_rate(&params, &bonded_ratio);
        minter.annual_provisions = self
            .policy
            .next_annual_provisions(&minter.inflation, &self.staking.staking_token_supply());

        let minted = self.policy.block_provision(&params);
        let coins = CoinBag::from(minted.clone());
        if !coins.is_empty() {
            self.mint_coins(&coins)?;
            self.ledger.send_from_module(MODULE_NAME, &collector, &coins)?;
        }
        self.set_minter(&minter)?;

        debug!(
            target: LOG_TARGET,
            "height {} minted {} (inflation {}, annual provisions {})",
            ctx.block_height(),
            minted,
            minter.inflation,
            minter.annual_provisions
        );

        ctx.emit(
            Event::new(EVENT_TYPE_MINT)
                .with_attribute(ATTRIBUTE_KEY_BONDED_RATIO, &bonded_ratio)
                .with_attribute(ATTRIBUTE_KEY_INFLATION, &minter.inflation)
                .with_attribute(ATTRIBUTE_KEY_ANNUAL_PROVISIONS, &minter.annual_provisions)
                .with_attribute(ATTRIBUTE_KEY_AMOUNT, &minted.amount),
        );

        Ok(minted)
    }

    pub(crate) fn log_initialized(&self, params: &MintParams) {
        info!(
            target: LOG_TARGET,
            "mint initialized: {} per block in {}",
            self.policy.block_reward,
            params.mint_denom
        );
    }
}
