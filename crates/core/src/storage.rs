//! Storage actions recorded by one call frame.
use crate::field::Fr;

/// A storage slot observed by a read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractStorageRead {
    pub storage_slot: Fr,
    pub current_value: Fr,
}

/// A storage slot assigned by a write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractStorageUpdateRequest {
    pub storage_slot: Fr,
    pub new_value: Fr,
}

/// One read or write, in issuance order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageAction {
    Read { slot: Fr, value: Fr },
    Write { slot: Fr, new_value: Fr },
}

/// Append-only log of a frame's storage actions.
///
/// Nothing is deduplicated: repeated accesses to a slot each stay in the
/// log so the kernel can replay the exact sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageActionLog {
    actions: Vec<StorageAction>,
}

impl StorageActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(&mut self, slot: Fr, value: Fr) {
        self.actions.push(StorageAction::Read { slot, value });
    }

    pub fn record_write(&mut self, slot: Fr, new_value: Fr) {
        self.actions.push(StorageAction::Write { slot, new_value });
    }

    pub fn actions(&self) -> &[StorageAction] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Splits the log into reads and writes, each in original order.
    pub fn collect(self) -> (Vec<ContractStorageRead>, Vec<ContractStorageUpdateRequest>) {
        let mut reads = Vec::new();
        let mut writes = Vec::new();
        for action in self.actions {
            match action {
                StorageAction::Read { slot, value } => reads.push(ContractStorageRead {
                    storage_slot: slot,
                    current_value: value,
                }),
                StorageAction::Write { slot, new_value } => {
                    writes.push(ContractStorageUpdateRequest {
                        storage_slot: slot,
                        new_value,
                    })
                }
            }
        }
        (reads, writes)
    }
}
