//! Fee deduction stage

use log::debug;
use skaf_core::{AnteDecorator, AnteNext, Context, Ledger, Tx, TxError};
use std::sync::Arc;

/// Moves the fee from the payer into the fee collector before anything else
/// runs. A payer that cannot cover the fee fails the transaction.
pub struct DeductFeeDecorator {
    ledger: Arc<dyn Ledger>,
    fee_collector: String,
}

impl DeductFeeDecorator {
    pub fn new(ledger: Arc<dyn Ledger>, fee_collector: impl Into<String>) -> Self {
        Self {
            ledger,
            fee_collector: fee_collector.into(),
        }
    }
}

impl AnteDecorator for DeductFeeDecorator {
    fn ante_handle(
        &self,
        ctx: &mut Context,
        tx: &dyn Tx,
        simulate: bool,
        next: AnteNext<'_>,
    ) -> skaf_core::error::Result<()> {
        let fee_tx = tx
            .as_fee_tx()
            .ok_or_else(|| TxError::MalformedTransaction("Tx must be a FeeTx".to_string()))?;
        let fee = fee_tx.fee();
        fee.validate()
            .map_err(|e| TxError::MalformedTransaction(format!("invalid fee: {}", e)))?;

        if !simulate && !fee.is_empty() {
            self.ledger
                .send_to_module(fee_tx.fee_payer(), &self.fee_collector, fee)?;
            debug!(
                target: "app",
                "deducted fee {} from {} at height {}",
                fee,
                fee_tx.fee_payer(),
                ctx.block_height()
            );
        }

        next.call(ctx, tx, simulate)
    }
}
