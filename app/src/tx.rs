//! Application transactions

use skaf_core::{Address, CoinBag, FeeTx, Tx};
use skaf_feedist::{MsgEnableFeeDistribution, MsgSetDeveloperAddress};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    /// Plain account to account transfer
    Send {
        from: Address,
        to: Address,
        amount: CoinBag,
    },
    SetDeveloperAddress(MsgSetDeveloperAddress),
    EnableFeeDistribution(MsgEnableFeeDistribution),
}

impl AppMsg {
    pub fn msg_type(&self) -> &'static str {
        match self {
            AppMsg::Send { .. } => "send",
            AppMsg::SetDeveloperAddress(msg) => msg.msg_type(),
            AppMsg::EnableFeeDistribution(msg) => msg.msg_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTx {
    pub msgs: Vec<AppMsg>,
    pub fee: CoinBag,
    pub fee_payer: Address,
    pub gas_limit: u64,
    pub memo: String,
}

impl AppTx {
    pub fn new(fee_payer: Address, fee: CoinBag) -> Self {
        Self {
            msgs: Vec::new(),
            fee,
            fee_payer,
            gas_limit: 200_000,
            memo: String::new(),
        }
    }

    pub fn with_msg(mut self, msg: AppMsg) -> Self {
        self.msgs.push(msg);
        self
    }

    /// Bytes handed to the execution context for the tx hash
    pub fn tx_bytes(&self) -> Vec<u8> {
        format!("{:?}", self).into_bytes()
    }
}

impl Tx for AppTx {
    fn as_fee_tx(&self) -> Option<&dyn FeeTx> {
        Some(self)
    }
}

impl FeeTx for AppTx {
    fn fee(&self) -> &CoinBag {
        &self.fee
    }

    fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    fn fee_payer(&self) -> &Address {
        &self.fee_payer
    }
}
