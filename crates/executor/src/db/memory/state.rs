//! In-memory PublicStateDb implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use simulator_core::{AztecAddress, Fr};

use crate::db::{DbError, PublicStateDb};

/// In-memory public storage keyed by `(contract, slot)`.
///
/// Writes land immediately, so later reads observe them.
pub struct InMemoryPublicStateDb {
    slots: RwLock<HashMap<(AztecAddress, Fr), Fr>>,
}

impl InMemoryPublicStateDb {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create with pre-populated slots.
    pub fn with_slots(slots: impl IntoIterator<Item = ((AztecAddress, Fr), Fr)>) -> Self {
        Self {
            slots: RwLock::new(slots.into_iter().collect()),
        }
    }

    /// Current value of a slot without going through the async interface.
    pub fn get(&self, contract: AztecAddress, slot: Fr) -> Result<Fr, DbError> {
        let slots = self.slots.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(slots.get(&(contract, slot)).copied().unwrap_or_else(Fr::zero))
    }

    /// Assigns a slot without going through the async interface.
    pub fn set(&self, contract: AztecAddress, slot: Fr, value: Fr) -> Result<(), DbError> {
        let mut slots = self.slots.write().map_err(|_| DbError::LockPoisoned)?;
        slots.insert((contract, slot), value);
        Ok(())
    }

    /// Number of slots that have ever been written.
    pub fn len(&self) -> usize {
        self.slots.read().map(|slots| slots.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPublicStateDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublicStateDb for InMemoryPublicStateDb {
    async fn storage_read(&self, contract: AztecAddress, slot: Fr) -> Result<Fr, DbError> {
        self.get(contract, slot)
    }

    async fn storage_write(
        &self,
        contract: AztecAddress,
        slot: Fr,
        value: Fr,
    ) -> Result<(), DbError> {
        self.set(contract, slot, value)
    }
}
