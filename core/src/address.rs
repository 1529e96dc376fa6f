//! Account addresses and the address validator capability

use bech32::{Bech32, Hrp};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Length of an account address payload in bytes
pub const ADDRESS_LENGTH: usize = 20;

/// Length of a contract/derived address payload in bytes
pub const LONG_ADDRESS_LENGTH: usize = 32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty address string is not allowed")]
    Empty,

    #[error("Decoding bech32 failed: {0}")]
    Decode(String),

    #[error("Invalid address prefix: expected {expected}, got {found}")]
    WrongPrefix { expected: String, found: String },

    #[error("Invalid address length: {0} bytes")]
    InvalidLength(usize),

    #[error("Invalid bech32 prefix: {0}")]
    InvalidPrefix(String),
}

/// A parsed, canonical (lowercase bech32) account address
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address {
    encoded: String,
    payload: Vec<u8>,
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

/// Parses and encodes addresses for one chain
pub trait AddressValidator: Send + Sync {
    fn parse(&self, address: &str) -> Result<Address, AddressError>;

    fn encode(&self, payload: &[u8]) -> Result<Address, AddressError>;
}

/// Bech32 addresses under a fixed human-readable prefix
#[derive(Debug, Clone)]
pub struct Bech32AddressValidator {
    hrp: Hrp,
}

impl Bech32AddressValidator {
    pub fn new(prefix: &str) -> Result<Self, AddressError> {
        let hrp = Hrp::parse(prefix).map_err(|e| AddressError::InvalidPrefix(e.to_string()))?;
        Ok(Self { hrp })
    }

    pub fn prefix(&self) -> &str {
        self.hrp.as_str()
    }
}

fn check_length(len: usize) -> Result<(), AddressError> {
    if len == ADDRESS_LENGTH || len == LONG_ADDRESS_LENGTH {
        Ok(())
    } else {
        Err(AddressError::InvalidLength(len))
    }
}

impl AddressValidator for Bech32AddressValidator {
    fn parse(&self, address: &str) -> Result<Address, AddressError> {
        if address.trim().is_empty() {
            return Err(AddressError::Empty);
        }

        let (hrp, payload) =
            bech32::decode(address).map_err(|e| AddressError::Decode(e.to_string()))?;
        if hrp != self.hrp {
            return Err(AddressError::WrongPrefix {
                expected: self.hrp.to_string(),
                found: hrp.to_string(),
            });
        }
        check_length(payload.len())?;

        Ok(Address {
            encoded: address.to_lowercase(),
            payload,
        })
    }

    fn encode(&self, payload: &[u8]) -> Result<Address, AddressError> {
        check_length(payload.len())?;
        let encoded = bech32::encode::<Bech32>(self.hrp, payload)
            .map_err(|e| AddressError::Decode(e.to_string()))?;

        Ok(Address {
            encoded,
            payload: payload.to_vec(),
        })
    }
}

/// Deterministic address of a module account: first 20 bytes of sha256(name)
pub fn module_address(
    validator: &dyn AddressValidator,
    module_name: &str,
) -> Result<Address, AddressError> {
    let mut hasher = Sha256::new();
    hasher.update(module_name.as_bytes());
    let digest = hasher.finalize();
    validator.encode(&digest[..ADDRESS_LENGTH])
}
