//! SKAF Storage Layer
//!
//! Key-value stores that hold module state:
//! - `MemStore` for tests and throwaway nodes
//! - `SledStore` for on-disk persistence
//! - `PrefixStore` to scope a shared store to one module
//!
//! Records are written as versioned binary blobs, see [`codec`].

pub mod codec;
pub mod kv;

pub use codec::{decode_record, encode_record, load_record, save_record};
pub use kv::{KvStore, MemStore, PrefixStore, SledStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported record version {found} (expected {expected})")]
    UnsupportedVersion { expected: u8, found: u8 },

    #[error("Empty record")]
    EmptyRecord,
}

pub type Result<T> = std::result::Result<T, StorageError>;
