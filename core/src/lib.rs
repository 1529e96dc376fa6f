//! SKAF Core Library
//!
//! Shared building blocks for the monetary modules: exact coin and decimal
//! arithmetic, addresses, the ledger capability, the execution context and
//! the transaction middleware chain.

pub mod address;
pub mod coin;
pub mod context;
pub mod dec;
pub mod error;
pub mod events;
pub mod ledger;
pub mod pipeline;
pub mod transaction;

// Re-export main types
pub use address::{module_address, Address, AddressError, AddressValidator, Bech32AddressValidator};
pub use coin::{validate_denom, Coin, CoinBag, CoinError};
pub use context::Context;
pub use dec::{Dec, DecError};
pub use error::{ConfigurationError, LedgerError, TxError};
pub use events::{Attribute, Event, EventManager};
pub use ledger::{InMemoryLedger, Ledger};
pub use pipeline::{AnteChain, AnteDecorator, AnteNext, PostChain, PostDecorator, PostNext};
pub use transaction::{fee_of, FeeTx, Tx};

/// Chain-wide constants
pub mod constants {
    /// Denominator for basis-point percentages (100%)
    pub const BPS_DENOMINATOR: u64 = 10_000;

    /// Bech32 human-readable prefix for account addresses
    pub const BECH32_PREFIX: &str = "skaf";

    /// Smallest unit of SKAF (1 SKAF = 1,000,000 uskaf)
    pub const BASE_DENOM: &str = "uskaf";

    /// Module account that receives transaction fees
    pub const FEE_COLLECTOR_NAME: &str = "fee_collector";

    /// Module account that mints block provisions
    pub const MINT_MODULE_NAME: &str = "mint";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_constants() {
        assert_eq!(constants::BPS_DENOMINATOR, 10_000);
        assert!(validate_denom(constants::BASE_DENOM).is_ok());
        assert!(Bech32AddressValidator::new(constants::BECH32_PREFIX).is_ok());
    }
}
