//! Initial witness layout for public functions.
//!
//! The order of the context fields is an ABI contract with the circuit: the
//! bytecode reads `msg_sender` from the first assigned index, the roots
//! after the call flags, and its arguments last. Reordering anything here
//! breaks every deployed public function.
use std::collections::BTreeMap;
use std::fmt;

use crate::call::{CallContext, HistoricTreeRoots};
use crate::error::AbiError;
use crate::field::Fr;

/// Number of context and root fields placed ahead of the arguments.
pub const CONTEXT_FIELD_COUNT: usize = 10;

/// Index of a circuit variable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WitnessIndex(pub u32);

impl fmt::Display for WitnessIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Sparse assignment of field values to witness indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessMap(BTreeMap<WitnessIndex, Fr>);

impl WitnessMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `values` to consecutive indices starting at `start`.
    ///
    /// Fails if the last index would lie past `u32::MAX`.
    pub fn from_values(start: u32, values: Vec<Fr>) -> Result<Self, AbiError> {
        let count = values.len();
        let fits = match count.checked_sub(1) {
            None => true,
            Some(last) => u32::try_from(last)
                .ok()
                .and_then(|last| start.checked_add(last))
                .is_some(),
        };
        if !fits {
            return Err(AbiError::WitnessIndexOverflow { start, count });
        }

        let map = (start..=u32::MAX)
            .zip(values)
            .map(|(index, value)| (WitnessIndex(index), value))
            .collect();
        Ok(Self(map))
    }

    pub fn insert(&mut self, index: WitnessIndex, value: Fr) -> Option<Fr> {
        self.0.insert(index, value)
    }

    pub fn get(&self, index: WitnessIndex) -> Option<Fr> {
        self.0.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WitnessIndex, Fr)> + '_ {
        self.0.iter().map(|(index, value)| (*index, *value))
    }
}

/// Context and root fields in ABI order, followed by the arguments.
pub fn initial_witness_fields(
    args: &[Fr],
    call_context: &CallContext,
    roots: &HistoricTreeRoots,
) -> Vec<Fr> {
    let mut fields = Vec::with_capacity(CONTEXT_FIELD_COUNT + args.len());
    fields.extend([
        call_context.msg_sender.to_field(),
        call_context.storage_contract_address.to_field(),
        call_context.portal_contract_address.to_field(),
        Fr::from(call_context.is_delegate_call),
        Fr::from(call_context.is_static_call),
        Fr::from(call_context.is_contract_deployment),
        roots.private_data_tree_root,
        roots.nullifier_tree_root,
        roots.contract_tree_root,
        roots.l1_to_l2_messages_tree_root,
    ]);
    fields.extend_from_slice(args);
    fields
}

/// Builds the VM's initial witness starting at `witness_start_index`.
///
/// Argument count is not checked against the function's arity; a mismatch
/// surfaces as a VM failure. A start index too close to `u32::MAX` to hold
/// every field is an [`AbiError::WitnessIndexOverflow`].
pub fn build_initial_witness(
    args: &[Fr],
    call_context: &CallContext,
    roots: &HistoricTreeRoots,
    witness_start_index: u32,
) -> Result<WitnessMap, AbiError> {
    WitnessMap::from_values(
        witness_start_index,
        initial_witness_fields(args, call_context, roots),
    )
}
