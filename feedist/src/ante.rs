//! Pipeline stages that distribute fees
//!
//! Either stage can be installed. Distribution errors are logged and the
//! rest of the chain always runs; only a transaction without a fee field
//! is rejected.

use log::{error, info};
use skaf_core::{fee_of, AnteDecorator, AnteNext, Context, PostDecorator, PostNext, Tx};
use std::sync::Arc;

use crate::keeper::{FeeDistKeeper, LOG_TARGET};

/// Distributes fees before message execution
pub struct FeeDistributionDecorator {
    keeper: Arc<FeeDistKeeper>,
}

impl FeeDistributionDecorator {
    pub fn new(keeper: Arc<FeeDistKeeper>) -> Self {
        Self { keeper }
    }
}

impl AnteDecorator for FeeDistributionDecorator {
    fn ante_handle(
        &self,
        ctx: &mut Context,
        tx: &dyn Tx,
        simulate: bool,
        next: AnteNext<'_>,
    ) -> skaf_core::error::Result<()> {
        if simulate {
            return next.call(ctx, tx, simulate);
        }

        let fees = fee_of(tx)?;
        if !fees.is_empty() {
            if let Err(e) = self.keeper.distribute_fees(ctx, fees) {
                error!(target: LOG_TARGET, "Failed to distribute fees {}: {}", fees, e);
            }
        }

        next.call(ctx, tx, simulate)
    }
}

/// Distributes fees after successful message execution
pub struct FeeDistributionPostHandler {
    keeper: Arc<FeeDistKeeper>,
}

impl FeeDistributionPostHandler {
    pub fn new(keeper: Arc<FeeDistKeeper>) -> Self {
        Self { keeper }
    }
}

impl PostDecorator for FeeDistributionPostHandler {
    fn post_handle(
        &self,
        ctx: &mut Context,
        tx: &dyn Tx,
        simulate: bool,
        success: bool,
        next: PostNext<'_>,
    ) -> skaf_core::error::Result<()> {
        if success && !simulate {
            let fees = fee_of(tx)?;
            if !fees.is_empty() {
                info!(
                    target: LOG_TARGET,
                    "Distributing transaction fees {} for tx {}",
                    fees,
                    ctx.tx_hash()
                );
                if let Err(e) = self.keeper.distribute_fees(ctx, fees) {
                    error!(target: LOG_TARGET, "Failed to distribute fees {}: {}", fees, e);
                }
            }
        }

        next.call(ctx, tx, simulate, success)
    }
}
