//! Per-frame storage action collector.
use simulator_core::{
    AztecAddress, ContractStorageRead, ContractStorageUpdateRequest, Fr, StorageActionLog,
};
use tracing::debug;

use crate::db::{DbError, PublicStateDb};

/// Records every storage read and write one frame issues, in issuance order.
///
/// Reads always go to the store so they observe writes persisted earlier in
/// the transaction. Writes are only recorded here; persisting them is the
/// caller's job.
pub struct ContractStorageActionsCollector<'a> {
    db: &'a dyn PublicStateDb,
    contract_address: AztecAddress,
    log: StorageActionLog,
}

impl<'a> ContractStorageActionsCollector<'a> {
    pub fn new(db: &'a dyn PublicStateDb, contract_address: AztecAddress) -> Self {
        Self {
            db,
            contract_address,
            log: StorageActionLog::new(),
        }
    }

    pub fn contract_address(&self) -> AztecAddress {
        self.contract_address
    }

    pub async fn read(&mut self, slot: Fr) -> Result<Fr, DbError> {
        let value = self.db.storage_read(self.contract_address, slot).await?;
        debug!(
            contract = %self.contract_address,
            slot = %slot.to_short_string(),
            value = %value.to_short_string(),
            "storage read"
        );
        self.log.record_read(slot, value);
        Ok(value)
    }

    pub fn write(&mut self, slot: Fr, new_value: Fr) -> Fr {
        debug!(
            contract = %self.contract_address,
            slot = %slot.to_short_string(),
            value = %new_value.to_short_string(),
            "storage write"
        );
        self.log.record_write(slot, new_value);
        new_value
    }

    pub fn actions(&self) -> &StorageActionLog {
        &self.log
    }

    /// Reads and writes in issuance order, without deduplication.
    pub fn collect(self) -> (Vec<ContractStorageRead>, Vec<ContractStorageUpdateRequest>) {
        self.log.collect()
    }
}
