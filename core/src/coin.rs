//! Coins and normalized coin bags
//!
//! Amounts are arbitrary-precision unsigned integers. A `CoinBag` keeps its
//! denominations sorted and never stores a zero amount, so two bags holding the
//! same value always compare (and serialize) identically.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::ConfigurationError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinError {
    #[error("Invalid denomination: {0}")]
    InvalidDenom(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

/// Check a denomination against `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<(), ConfigurationError> {
    let bytes = denom.as_bytes();
    let invalid = || ConfigurationError::InvalidDenom(denom.to_string());

    if bytes.len() < 3 || bytes.len() > 128 {
        return Err(invalid());
    }
    if !bytes[0].is_ascii_alphabetic() {
        return Err(invalid());
    }
    let tail_ok = bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'));
    if !tail_ok {
        return Err(invalid());
    }

    Ok(())
}

/// A single denomination and amount
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_serde")]
    pub amount: BigUint,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    /// Parse `"<amount><denom>"`, e.g. `100uskaf`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinError::InvalidDenom(s.to_string()))?;
        let (amount, denom) = s.split_at(split);

        if amount.is_empty() {
            return Err(CoinError::InvalidAmount(s.to_string()));
        }
        validate_denom(denom).map_err(|_| CoinError::InvalidDenom(denom.to_string()))?;
        let amount = BigUint::from_str(amount)
            .map_err(|_| CoinError::InvalidAmount(amount.to_string()))?;

        Ok(Coin::new(denom, amount))
    }
}

/// Normalized mapping from denomination to a non-zero amount
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct CoinBag {
    coins: BTreeMap<String, BigUint>,
}

impl CoinBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bag holding a single coin (empty if the amount is zero)
    pub fn single(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        let mut bag = Self::new();
        bag.add(Coin::new(denom, amount));
        bag
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    /// Amount held for `denom`, zero when absent
    pub fn amount_of(&self, denom: &str) -> BigUint {
        self.coins.get(denom).cloned().unwrap_or_default()
    }

    /// Add a coin, merging with an existing entry of the same denomination
    pub fn add(&mut self, coin: Coin) {
        if coin.amount.is_zero() {
            return;
        }
        *self.coins.entry(coin.denom).or_default() += coin.amount;
    }

    /// Sum of two bags
    pub fn merged(&self, other: &CoinBag) -> CoinBag {
        let mut out = self.clone();
        for coin in other.iter() {
            out.add(coin);
        }
        out
    }

    /// `self - other`, or `None` if any denomination would go negative
    pub fn checked_sub(&self, other: &CoinBag) -> Option<CoinBag> {
        let mut out = self.clone();
        for (denom, amount) in &other.coins {
            let held = out.coins.get_mut(denom)?;
            if *held < *amount {
                return None;
            }
            *held -= amount;
            if held.is_zero() {
                out.coins.remove(denom);
            }
        }
        Some(out)
    }

    /// Validate every denomination in the bag
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.coins.keys().try_for_each(|denom| validate_denom(denom))
    }

    /// Coins in denomination order
    pub fn iter(&self) -> impl Iterator<Item = Coin> + '_ {
        self.coins
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), amount.clone()))
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.coins.keys().map(String::as_str)
    }
}

impl From<Coin> for CoinBag {
    fn from(coin: Coin) -> Self {
        let mut bag = CoinBag::new();
        bag.add(coin);
        bag
    }
}

impl From<Vec<Coin>> for CoinBag {
    fn from(coins: Vec<Coin>) -> Self {
        coins.into_iter().collect()
    }
}

impl From<CoinBag> for Vec<Coin> {
    fn from(bag: CoinBag) -> Self {
        bag.iter().collect()
    }
}

impl FromIterator<Coin> for CoinBag {
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        let mut bag = CoinBag::new();
        for coin in iter {
            bag.add(coin);
        }
        bag
    }
}

impl fmt::Display for CoinBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for CoinBag {
    type Err = CoinError;

    /// Parse a comma separated list, e.g. `100uskaf,5uatom`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(CoinBag::new());
        }
        s.split(',').map(Coin::from_str).collect()
    }
}

/// Amounts travel as decimal strings so JSON consumers never see floats
pub mod amount_serde {
    use super::*;

    pub fn serialize<S: Serializer>(amount: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(&s).map_err(serde::de::Error::custom)
    }
}
