//! Ledger capability
//!
//! The monetary modules never own balances. They ask an external accounting
//! module to move or mint coins through this trait; every call is atomic.

use num_bigint::BigUint;
use parking_lot::RwLock;
use std::collections::BTreeMap;

use crate::address::Address;
use crate::coin::CoinBag;
use crate::error::LedgerError;

pub trait Ledger: Send + Sync {
    /// Address of a registered module account
    fn module_address(&self, module: &str) -> Option<Address>;

    /// Move `coins` from a module account to any address
    fn send_from_module(
        &self,
        module: &str,
        to: &Address,
        coins: &CoinBag,
    ) -> Result<(), LedgerError>;

    /// Move `coins` from an account into a module account
    fn send_to_module(
        &self,
        from: &Address,
        module: &str,
        coins: &CoinBag,
    ) -> Result<(), LedgerError>;

    /// Create `coins` in a module account, increasing supply
    fn mint(&self, module: &str, coins: &CoinBag) -> Result<(), LedgerError>;

    fn balance(&self, address: &Address) -> CoinBag;

    fn supply(&self, denom: &str) -> BigUint;
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: BTreeMap<Address, CoinBag>,
    modules: BTreeMap<String, Address>,
    supply: CoinBag,
}

impl LedgerState {
    fn module(&self, name: &str) -> Result<Address, LedgerError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownModuleAccount(name.to_string()))
    }

    fn transfer(&mut self, from: &Address, to: &Address, coins: &CoinBag) -> Result<(), LedgerError> {
        coins
            .validate()
            .map_err(|e| LedgerError::InvalidCoins(e.to_string()))?;

        let held = self.balances.get(from).cloned().unwrap_or_default();
        let remaining = held
            .checked_sub(coins)
            .ok_or_else(|| LedgerError::InsufficientFunds {
                requested: coins.to_string(),
                available: held.to_string(),
            })?;

        if remaining.is_empty() {
            self.balances.remove(from);
        } else {
            self.balances.insert(from.clone(), remaining);
        }
        let credited = self.balances.entry(to.clone()).or_default();
        *credited = credited.merged(coins);

        log::debug!(target: "ledger", "transfer {} from {} to {}", coins, from, to);
        Ok(())
    }
}

/// Single-process ledger used by the development node and tests
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_module(&self, name: impl Into<String>, address: Address) {
        self.state.write().modules.insert(name.into(), address);
    }

    /// Account to account transfer
    pub fn send(&self, from: &Address, to: &Address, coins: &CoinBag) -> Result<(), LedgerError> {
        self.state.write().transfer(from, to, coins)
    }

    /// Credit genesis balances; counts towards supply
    pub fn fund(&self, address: &Address, coins: &CoinBag) {
        let mut state = self.state.write();
        let entry = state.balances.entry(address.clone()).or_default();
        *entry = entry.merged(coins);
        state.supply = state.supply.merged(coins);
    }
}

impl Ledger for InMemoryLedger {
    fn module_address(&self, module: &str) -> Option<Address> {
        self.state.read().modules.get(module).cloned()
    }

    fn send_from_module(
        &self,
        module: &str,
        to: &Address,
        coins: &CoinBag,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let from = state.module(module)?;
        state.transfer(&from, to, coins)
    }

    fn send_to_module(
        &self,
        from: &Address,
        module: &str,
        coins: &CoinBag,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write();
        let to = state.module(module)?;
        state.transfer(from, &to, coins)
    }

    fn mint(&self, module: &str, coins: &CoinBag) -> Result<(), LedgerError> {
        coins
            .validate()
            .map_err(|e| LedgerError::InvalidCoins(e.to_string()))?;

        let mut state = self.state.write();
        let account = state.module(module)?;
        let entry = state.balances.entry(account).or_default();
        *entry = entry.merged(coins);
        state.supply = state.supply.merged(coins);
        Ok(())
    }

    fn balance(&self, address: &Address) -> CoinBag {
        self.state
            .read()
            .balances
            .get(address)
            .cloned()
            .unwrap_or_default()
    }

    fn supply(&self, denom: &str) -> BigUint {
        self.state.read().supply.amount_of(denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{AddressValidator, Bech32AddressValidator};

    fn addr(byte: u8) -> Address {
        Bech32AddressValidator::new("skaf")
            .unwrap()
            .encode(&[byte; 20])
            .unwrap()
    }

    fn ledger_with_collector() -> (InMemoryLedger, Address) {
        let ledger = InMemoryLedger::new();
        let collector = addr(0xfc);
        ledger.register_module("fee_collector", collector.clone());
        (ledger, collector)
    }

    #[test]
    fn test_send_from_module() {
        let (ledger, collector) = ledger_with_collector();
        ledger.fund(&collector, &"100uskaf".parse().unwrap());

        let dev = addr(1);
        ledger
            .send_from_module("fee_collector", &dev, &"10uskaf".parse().unwrap())
            .unwrap();

        assert_eq!(ledger.balance(&dev).to_string(), "10uskaf");
        assert_eq!(ledger.balance(&collector).to_string(), "90uskaf");
        assert_eq!(ledger.supply("uskaf"), BigUint::from(100u32));
    }

    #[test]
    fn test_failed_transfer_changes_nothing() {
        let (ledger, collector) = ledger_with_collector();
        ledger.fund(&collector, &"5uskaf".parse().unwrap());

        let err = ledger
            .send_from_module("fee_collector", &addr(1), &"6uskaf".parse().unwrap())
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        assert_eq!(ledger.balance(&collector).to_string(), "5uskaf");
        assert!(ledger.balance(&addr(1)).is_empty());
    }

    #[test]
    fn test_account_send() {
        let ledger = InMemoryLedger::new();
        ledger.fund(&addr(1), &"50uskaf".parse().unwrap());

        ledger.send(&addr(1), &addr(2), &"20uskaf".parse().unwrap()).unwrap();
        assert_eq!(ledger.balance(&addr(1)).to_string(), "30uskaf");
        assert_eq!(ledger.balance(&addr(2)).to_string(), "20uskaf");
    }

    #[test]
    fn test_unknown_module() {
        let ledger = InMemoryLedger::new();
        let err = ledger.mint("mint", &"1uskaf".parse().unwrap()).unwrap_err();
        assert_eq!(err, LedgerError::UnknownModuleAccount("mint".to_string()));
    }

    #[test]
    fn test_mint_increases_supply() {
        let ledger = InMemoryLedger::new();
        let mint = addr(0xaa);
        ledger.register_module("mint", mint.clone());

        ledger.mint("mint", &"1000000uskaf".parse().unwrap()).unwrap();
        assert_eq!(ledger.supply("uskaf"), BigUint::from(1_000_000u32));
        assert_eq!(ledger.balance(&mint).to_string(), "1000000uskaf");
    }
}
