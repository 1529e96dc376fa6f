//! Fixed-point decimal with 18 fractional digits
//!
//! Backed by an unsigned big integer scaled by 10^18. Every operation is exact
//! integer arithmetic; multiplication rounds half to even when chopping the
//! extra precision, so results are identical on every node.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional digits
pub const PRECISION: u32 = 18;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecError {
    #[error("Invalid decimal: {0}")]
    Invalid(String),

    #[error("Too many fractional digits (max {PRECISION}): {0}")]
    TooPrecise(String),
}

fn scale() -> BigUint {
    BigUint::from(10u32).pow(PRECISION)
}

fn chop_precision_and_round(value: BigUint) -> BigUint {
    let s = scale();
    let quo = &value / &s;
    let rem = &value % &s;
    let half = &s / 2u32;

    match rem.cmp(&half) {
        Ordering::Less => quo,
        Ordering::Greater => quo + 1u32,
        Ordering::Equal => {
            if (&quo % 2u32).is_zero() {
                quo
            } else {
                quo + 1u32
            }
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigUint);

impl Dec {
    pub fn zero() -> Self {
        Dec(BigUint::zero())
    }

    pub fn one() -> Self {
        Dec(scale())
    }

    /// Whole number
    pub fn from_int(value: impl Into<BigUint>) -> Self {
        Dec(value.into() * scale())
    }

    /// `value * 10^-prec`, e.g. `new_with_prec(5, 3)` is 0.005
    pub fn new_with_prec(value: u64, prec: u32) -> Self {
        if prec <= PRECISION {
            Dec(BigUint::from(value) * BigUint::from(10u32).pow(PRECISION - prec))
        } else {
            Dec(BigUint::from(value) / BigUint::from(10u32).pow(prec - PRECISION))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn mul(&self, other: &Dec) -> Dec {
        Dec(chop_precision_and_round(&self.0 * &other.0))
    }

    /// Multiply by an integer; exact
    pub fn mul_int(&self, value: &BigUint) -> Dec {
        Dec(&self.0 * value)
    }

    /// Integer part, fraction discarded
    pub fn truncate_int(&self) -> BigUint {
        &self.0 / scale()
    }

    pub fn gt_one(&self) -> bool {
        self.0 > scale()
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = scale();
        let int = &self.0 / &s;
        let frac = (&self.0 % &s).to_str_radix(10);
        write!(f, "{}.{:0>width$}", int, frac, width = PRECISION as usize)
    }
}

impl fmt::Debug for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dec({})", self)
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (int, frac) = match s.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (s, ""),
        };

        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if int.is_empty() || !digits_only(int) || !digits_only(frac) {
            return Err(DecError::Invalid(s.to_string()));
        }
        if frac.len() > PRECISION as usize {
            return Err(DecError::TooPrecise(s.to_string()));
        }

        let padded = format!("{}{:0<width$}", int, frac, width = PRECISION as usize);
        let raw = BigUint::from_str(&padded).map_err(|_| DecError::Invalid(s.to_string()))?;
        Ok(Dec(raw))
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Dec::from_str(&s).map_err(serde::de::Error::custom)
    }
}
