//! Application composition

use log::{debug, info, warn};
use serde::Serialize;
use skaf_core::constants::{FEE_COLLECTOR_NAME, MINT_MODULE_NAME};
use skaf_core::{
    module_address, Address, AddressError, AddressValidator, AnteChain, Bech32AddressValidator,
    CoinBag, Context, Event, InMemoryLedger, PostChain, TxError,
};
use skaf_economics::{MintError, MintKeeper, MintParams, Minter};
use skaf_feedist::{
    FeeDistError, FeeDistKeeper, FeeDistributionConfig, FeeDistributionDecorator,
    FeeDistributionPostHandler, ModuleConfig, MsgServer,
};
use skaf_storage::{KvStore, MemStore, PrefixStore, SledStore, StorageError};
use std::sync::Arc;
use thiserror::Error;

use crate::ante::DeductFeeDecorator;
use crate::config::{ConfigError, DistributionStage, NodeConfig};
use crate::constants::{FEEDIST_STORE_PREFIX, GOV_MODULE_NAME, MINT_STORE_PREFIX};
use crate::tx::{AppMsg, AppTx};

const LOG_TARGET: &str = "app";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    #[error("Mint error: {0}")]
    Mint(#[from] MintError),

    #[error("Fee distribution error: {0}")]
    FeeDist(#[from] FeeDistError),

    #[error("Invalid genesis: {0}")]
    Genesis(String),
}

/// Outcome of a delivered transaction
#[derive(Debug, Clone, Serialize)]
pub struct TxResult {
    /// Whether the messages executed; fee handling never changes this
    pub success: bool,
    pub log: String,
    pub events: Vec<Event>,
}

/// Module genesis documents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppGenesis {
    pub feedist: skaf_feedist::GenesisState,
    pub mint: skaf_economics::GenesisState,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppStatus {
    pub authority: String,
    pub distribution_stage: DistributionStage,
    pub fee_distribution: FeeDistributionConfig,
    pub minter: Minter,
    pub params: MintParams,
}

pub struct SkafApp {
    config: NodeConfig,
    validator: Arc<Bech32AddressValidator>,
    ledger: Arc<InMemoryLedger>,
    feedist: Arc<FeeDistKeeper>,
    mint: MintKeeper,
    msg_server: MsgServer,
    ante: AnteChain,
    post: PostChain,
}

impl SkafApp {
    /// Open the configured store (sled when `data_dir` is set) and compose
    pub fn new(config: NodeConfig) -> Result<Self, AppError> {
        config.validate()?;
        let store: Arc<dyn KvStore> = match &config.node.data_dir {
            Some(dir) => Arc::new(SledStore::open(dir)?),
            None => Arc::new(MemStore::new()),
        };
        Self::with_store(config, store)
    }

    pub fn with_store(config: NodeConfig, store: Arc<dyn KvStore>) -> Result<Self, AppError> {
        let validator = Arc::new(Bech32AddressValidator::new(&config.node.bech32_prefix)?);

        let ledger = Arc::new(InMemoryLedger::new());
        for name in [FEE_COLLECTOR_NAME, MINT_MODULE_NAME] {
            ledger.register_module(name, module_address(&*validator, name)?);
        }

        let authority = if config.node.authority.is_empty() {
            module_address(&*validator, GOV_MODULE_NAME)?
        } else {
            validator.parse(&config.node.authority)?
        };

        let feedist = Arc::new(FeeDistKeeper::new(
            Arc::new(PrefixStore::new(store.clone(), FEEDIST_STORE_PREFIX.to_vec())),
            ledger.clone(),
            validator.clone(),
        ));
        let mint = MintKeeper::new(
            Arc::new(PrefixStore::new(store, MINT_STORE_PREFIX.to_vec())),
            ledger.clone(),
            Arc::new(config.staking.staking_info()),
            config.issuance.clone(),
        );
        let msg_server = MsgServer::new(feedist.clone(), authority);

        let mut ante =
            AnteChain::new().with(DeductFeeDecorator::new(ledger.clone(), FEE_COLLECTOR_NAME));
        let mut post = PostChain::new();
        match config.node.distribution_stage {
            DistributionStage::Ante => {
                ante = ante.with(FeeDistributionDecorator::new(feedist.clone()));
            }
            DistributionStage::Post => {
                post = post.with(FeeDistributionPostHandler::new(feedist.clone()));
            }
        }

        info!(
            target: LOG_TARGET,
            "app composed: prefix={} authority={} distribution_stage={:?}",
            validator.prefix(),
            msg_server.authority(),
            config.node.distribution_stage
        );

        Ok(Self {
            config,
            validator,
            ledger,
            feedist,
            mint,
            msg_server,
            ante,
            post,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<InMemoryLedger> {
        &self.ledger
    }

    pub fn feedist(&self) -> &FeeDistKeeper {
        &self.feedist
    }

    pub fn mint(&self) -> &MintKeeper {
        &self.mint
    }

    pub fn authority(&self) -> &Address {
        self.msg_server.authority()
    }

    pub fn address_validator(&self) -> &dyn AddressValidator {
        &*self.validator
    }

    /// True once genesis has been written to the store
    pub fn is_initialized(&self) -> Result<bool, AppError> {
        match self.mint.minter() {
            Ok(_) => Ok(true),
            Err(MintError::NotInitialized(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Validate the configured genesis, then write it.
    ///
    /// Nothing is written if any part is invalid.
    pub fn init_genesis(&self) -> Result<(), AppError> {
        let genesis = &self.config.genesis;

        let mut accounts = Vec::with_capacity(genesis.accounts.len());
        for account in &genesis.accounts {
            let address = self.validator.parse(&account.address)?;
            let coins: CoinBag = account
                .coins
                .parse()
                .map_err(|e| AppError::Genesis(format!("{}: {}", account.address, e)))?;
            accounts.push((address, coins));
        }

        let feedist_state = skaf_feedist::GenesisState {
            config: ModuleConfig {
                fee_distribution: genesis.fee_distribution.clone(),
            },
        };
        feedist_state
            .validate(self.address_validator())
            .map_err(|e| AppError::Genesis(e.to_string()))?;
        skaf_economics::validate_genesis(&genesis.mint)
            .map_err(|e| AppError::Genesis(e.to_string()))?;

        for (address, coins) in &accounts {
            self.ledger.fund(address, coins);
        }
        skaf_feedist::init_genesis(&self.feedist, &feedist_state)?;
        skaf_economics::init_genesis(&self.mint, &genesis.mint)?;

        info!(
            target: LOG_TARGET,
            "genesis initialized with {} account(s)",
            accounts.len()
        );
        Ok(())
    }

    pub fn export_genesis(&self) -> Result<AppGenesis, AppError> {
        Ok(AppGenesis {
            feedist: skaf_feedist::export_genesis(&self.feedist)?,
            mint: skaf_economics::export_genesis(&self.mint)?,
        })
    }

    pub fn status(&self) -> Result<AppStatus, AppError> {
        Ok(AppStatus {
            authority: self.authority().to_string(),
            distribution_stage: self.config.node.distribution_stage,
            fee_distribution: self.feedist.fee_distribution_config()?,
            minter: self.mint.minter()?,
            params: self.mint.params()?,
        })
    }

    /// Per-block issuance; returns the block's events
    pub fn begin_block(&self, height: u64) -> Result<Vec<Event>, AppError> {
        let mut ctx = Context::new(height);
        self.mint.begin_block(&mut ctx)?;
        Ok(ctx.events_mut().take())
    }

    /// Run `tx` through ante chain, messages and post chain.
    ///
    /// Rejections by the ante chain (malformed tx, unpaid fee) are returned
    /// as errors. A failing message only marks the result unsuccessful and
    /// drops the events it emitted; the fee stays collected.
    pub fn deliver_tx(
        &self,
        ctx: &mut Context,
        tx: &AppTx,
        simulate: bool,
    ) -> Result<TxResult, TxError> {
        self.validate_basic(tx)?;
        self.ante.run(ctx, tx, simulate)?;

        let checkpoint = ctx.events().events().len();
        let outcome = if simulate {
            Ok(())
        } else {
            tx.msgs
                .iter()
                .try_for_each(|msg| self.execute_msg(ctx, tx, msg))
        };

        let log = match &outcome {
            Ok(()) => String::new(),
            Err(e) => {
                warn!(target: LOG_TARGET, "tx {} failed: {}", ctx.tx_hash(), e);
                ctx.events_mut().truncate(checkpoint);
                e.to_string()
            }
        };
        let success = outcome.is_ok();

        self.post.run(ctx, tx, simulate, success)?;

        Ok(TxResult {
            success,
            log,
            events: ctx.events_mut().take(),
        })
    }

    fn validate_basic(&self, tx: &AppTx) -> Result<(), TxError> {
        if tx.msgs.is_empty() {
            return Err(TxError::InvalidRequest("tx has no messages".to_string()));
        }

        for msg in &tx.msgs {
            match msg {
                AppMsg::Send { amount, .. } => {
                    amount.validate()?;
                    if amount.is_empty() {
                        return Err(TxError::InvalidRequest("send amount is empty".to_string()));
                    }
                }
                AppMsg::SetDeveloperAddress(msg) => msg.validate_basic(self.address_validator())?,
                AppMsg::EnableFeeDistribution(msg) => {
                    msg.validate_basic(self.address_validator())?
                }
            }
        }
        Ok(())
    }

    fn execute_msg(&self, ctx: &mut Context, tx: &AppTx, msg: &AppMsg) -> Result<(), TxError> {
        debug!(
            target: LOG_TARGET,
            "executing {} in tx {}",
            msg.msg_type(),
            ctx.tx_hash()
        );
        match msg {
            AppMsg::Send { from, to, amount } => {
                if from != &tx.fee_payer {
                    return Err(TxError::Unauthorized(format!(
                        "{} did not sign this transaction",
                        from
                    )));
                }
                self.ledger.send(from, to, amount)?;
                ctx.emit(
                    Event::new("transfer")
                        .with_attribute("sender", from)
                        .with_attribute("recipient", to)
                        .with_attribute("amount", amount),
                );
            }
            AppMsg::SetDeveloperAddress(msg) => self.msg_server.set_developer_address(ctx, msg)?,
            AppMsg::EnableFeeDistribution(msg) => {
                self.msg_server.enable_fee_distribution(ctx, msg)?
            }
        }
        Ok(())
    }
}
