//! Execution context handed to every pipeline stage and keeper call

use sha2::{Digest, Sha256};

use crate::events::{Event, EventManager};

#[derive(Debug, Clone, Default)]
pub struct Context {
    block_height: u64,
    tx_bytes: Vec<u8>,
    events: EventManager,
}

impl Context {
    pub fn new(block_height: u64) -> Self {
        Self {
            block_height,
            tx_bytes: Vec::new(),
            events: EventManager::new(),
        }
    }

    pub fn with_tx_bytes(mut self, tx_bytes: Vec<u8>) -> Self {
        self.tx_bytes = tx_bytes;
        self
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx_bytes
    }

    /// Uppercase hex sha256 of the raw transaction bytes
    pub fn tx_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.tx_bytes);
        hex::encode_upper(hasher.finalize())
    }

    pub fn emit(&mut self, event: Event) {
        self.events.emit(event);
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }
}
