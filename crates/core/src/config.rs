//! Protocol-level constants shared with the outer circuits.

/// Fixed widths and offsets the kernel circuit expects.
///
/// These are one half of a cross-component contract, so they are injected
/// rather than hardcoded at their use sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolConstants {
    /// Width of the return-value array seen by a caller of a nested public call.
    pub max_return_values: usize,
    /// First witness index assigned by the initial witness; index 0 is reserved.
    pub witness_start_index: u32,
    /// Capacity of the kernel's per-call storage read array.
    pub state_reads_length: usize,
    /// Capacity of the kernel's per-call storage write array.
    pub state_transitions_length: usize,
}

impl ProtocolConstants {
    pub const MAX_RETURN_VALUES: usize = 4;
    pub const WITNESS_START_INDEX: u32 = 1;
    pub const STATE_READS_LENGTH: usize = 16;
    pub const STATE_TRANSITIONS_LENGTH: usize = 16;
}

impl Default for ProtocolConstants {
    fn default() -> Self {
        Self {
            max_return_values: Self::MAX_RETURN_VALUES,
            witness_start_index: Self::WITNESS_START_INDEX,
            state_reads_length: Self::STATE_READS_LENGTH,
            state_transitions_length: Self::STATE_TRANSITIONS_LENGTH,
        }
    }
}
