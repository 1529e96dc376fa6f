//! Transaction views used by the pipeline

use crate::address::Address;
use crate::coin::CoinBag;
use crate::error::{Result, TxError};

/// Any transaction entering the pipeline
pub trait Tx {
    /// Fee-bearing view of the transaction, if it has one
    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        None
    }
}

/// A transaction that carries a fee
pub trait FeeTx {
    fn fee(&self) -> &CoinBag;

    fn gas_limit(&self) -> u64;

    fn fee_payer(&self) -> &Address;
}

/// Fee of `tx`, or `MalformedTransaction` when it exposes no fee field
pub fn fee_of(tx: &dyn Tx) -> Result<&CoinBag> {
    tx.as_fee_tx()
        .map(|fee_tx| fee_tx.fee())
        .ok_or_else(|| TxError::MalformedTransaction("Tx must be a FeeTx".to_string()))
}
