//! Fixed-size storage arrays consumed by the public kernel circuit.
//!
//! The kernel validates one frame at a time and expects its reads and writes
//! in arrays of constant length, padded with empty entries. An entry is empty
//! when both its slot and value are zero.
use crate::config::ProtocolConstants;
use crate::error::StateDiffError;
use crate::field::Fr;
use crate::result::PublicExecutionResult;

/// A storage read as laid out in kernel inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateRead {
    pub storage_slot: Fr,
    pub current_value: Fr,
}

impl StateRead {
    pub fn is_empty(&self) -> bool {
        self.storage_slot.is_zero() && self.current_value.is_zero()
    }
}

/// A storage write as laid out in kernel inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateTransition {
    pub storage_slot: Fr,
    pub new_value: Fr,
}

impl StateTransition {
    pub fn is_empty(&self) -> bool {
        self.storage_slot.is_zero() && self.new_value.is_zero()
    }
}

/// One frame's storage actions packed for the kernel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicCallStateDiff {
    pub state_reads: Vec<StateRead>,
    pub state_transitions: Vec<StateTransition>,
}

impl PublicCallStateDiff {
    /// Packs the frame's own reads and writes; nested frames are packed separately.
    pub fn from_result(
        result: &PublicExecutionResult,
        constants: &ProtocolConstants,
    ) -> Result<Self, StateDiffError> {
        let reads = &result.contract_storage_reads;
        if reads.len() > constants.state_reads_length {
            return Err(StateDiffError::TooManyReads {
                count: reads.len(),
                capacity: constants.state_reads_length,
            });
        }
        let writes = &result.contract_storage_update_requests;
        if writes.len() > constants.state_transitions_length {
            return Err(StateDiffError::TooManyWrites {
                count: writes.len(),
                capacity: constants.state_transitions_length,
            });
        }

        let mut state_reads: Vec<StateRead> = reads
            .iter()
            .map(|read| StateRead {
                storage_slot: read.storage_slot,
                current_value: read.current_value,
            })
            .collect();
        state_reads.resize(constants.state_reads_length, StateRead::default());

        let mut state_transitions: Vec<StateTransition> = writes
            .iter()
            .map(|write| StateTransition {
                storage_slot: write.storage_slot,
                new_value: write.new_value,
            })
            .collect();
        state_transitions.resize(constants.state_transitions_length, StateTransition::default());

        Ok(Self {
            state_reads,
            state_transitions,
        })
    }

    pub fn read_count(&self) -> usize {
        self.state_reads.iter().filter(|r| !r.is_empty()).count()
    }

    pub fn transition_count(&self) -> usize {
        self.state_transitions.iter().filter(|t| !t.is_empty()).count()
    }
}
