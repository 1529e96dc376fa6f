//! Versioned record encoding
//!
//! A record is one version byte followed by the bincode encoding of the value.
//! Readers reject versions they do not know instead of guessing a layout.

use serde::{de::DeserializeOwned, Serialize};

use crate::kv::KvStore;
use crate::{Result, StorageError};

pub fn encode_record<T: Serialize>(version: u8, value: &T) -> Result<Vec<u8>> {
    let body = bincode::serialize(value)
        .map_err(|e| StorageError::SerializationError(e.to_string()))?;

    let mut out = Vec::with_capacity(body.len() + 1);
    out.push(version);
    out.extend_from_slice(&body);
    Ok(out)
}

pub fn decode_record<T: DeserializeOwned>(version: u8, bytes: &[u8]) -> Result<T> {
    let (found, body) = bytes.split_first().ok_or(StorageError::EmptyRecord)?;
    if *found != version {
        return Err(StorageError::UnsupportedVersion {
            expected: version,
            found: *found,
        });
    }

    bincode::deserialize(body).map_err(|e| StorageError::SerializationError(e.to_string()))
}

/// Load and decode a record, `None` if the key is absent
pub fn load_record<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &[u8],
    version: u8,
) -> Result<Option<T>> {
    match store.get(key)? {
        Some(bytes) => decode_record(version, &bytes).map(Some),
        None => Ok(None),
    }
}

pub fn save_record<T: Serialize>(
    store: &dyn KvStore,
    key: &[u8],
    version: u8,
    value: &T,
) -> Result<()> {
    store.set(key, encode_record(version, value)?)
}
