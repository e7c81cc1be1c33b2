//! Typed decoding of the oracle calls a public function can issue.
//!
//! The VM suspends with an oracle name and a flat list of field inputs.
//! [`OracleCall::decode`] turns that into a tagged variant so the executor's
//! dispatch is an exhaustive `match` rather than a name lookup. Oracles that
//! only make sense for private execution decode to
//! [`OracleCall::PrivateOnly`] and are rejected by the public executor.
mod error;
mod format;
mod inputs;

pub use error::OracleError;
pub use format::{format_debug_log, pack_unencrypted_log};
pub use inputs::{CommitmentDataOracleInputs, MessageLoadOracleInputs};

use std::str::FromStr;

use crate::address::{AztecAddress, FunctionSelector};
use crate::field::Fr;

/// Every oracle name the VM may invoke.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleName {
    // Private-only
    #[strum(serialize = "getSecretKey")]
    GetSecretKey,
    #[strum(serialize = "getNotes2")]
    GetNotes,
    #[strum(serialize = "getRandomField")]
    GetRandomField,
    #[strum(serialize = "notifyCreatedNote")]
    NotifyCreatedNote,
    #[strum(serialize = "notifyNullifiedNote")]
    NotifyNullifiedNote,
    #[strum(serialize = "callPrivateFunction")]
    CallPrivateFunction,
    #[strum(serialize = "enqueuePublicFunctionCall")]
    EnqueuePublicFunctionCall,
    #[strum(serialize = "emitEncryptedLog")]
    EmitEncryptedLog,
    #[strum(serialize = "viewNotesPage")]
    ViewNotesPage,

    // Available in public execution
    #[strum(serialize = "debugLog")]
    DebugLog,
    #[strum(serialize = "getL1ToL2Message")]
    GetL1ToL2Message,
    #[strum(serialize = "getCommitment")]
    GetCommitment,
    #[strum(serialize = "storageRead")]
    StorageRead,
    #[strum(serialize = "storageWrite")]
    StorageWrite,
    #[strum(serialize = "createCommitment")]
    CreateCommitment,
    #[strum(serialize = "createL2ToL1Message")]
    CreateL2ToL1Message,
    #[strum(serialize = "createNullifier")]
    CreateNullifier,
    #[strum(serialize = "callPublicFunction")]
    CallPublicFunction,
    #[strum(serialize = "emitUnencryptedLog")]
    EmitUnencryptedLog,
}

impl OracleName {
    /// Returns true if the oracle may be called from public bytecode.
    pub const fn is_public(self) -> bool {
        use OracleName::*;
        match self {
            GetSecretKey | GetNotes | GetRandomField | NotifyCreatedNote | NotifyNullifiedNote
            | CallPrivateFunction | EnqueuePublicFunctionCall | EmitEncryptedLog
            | ViewNotesPage => false,

            DebugLog | GetL1ToL2Message | GetCommitment | StorageRead | StorageWrite
            | CreateCommitment | CreateL2ToL1Message | CreateNullifier | CallPublicFunction
            | EmitUnencryptedLog => true,
        }
    }
}

/// A decoded oracle call with typed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OracleCall {
    DebugLog {
        fields: Vec<Fr>,
    },
    GetL1ToL2Message {
        message_key: Fr,
    },
    GetCommitment {
        commitment: Fr,
    },
    StorageRead {
        slot: Fr,
    },
    StorageWrite {
        slot: Fr,
        value: Fr,
    },
    CreateCommitment {
        commitment: Fr,
    },
    CreateL2ToL1Message {
        message: Fr,
    },
    CreateNullifier {
        nullifier: Fr,
    },
    CallPublicFunction {
        target: AztecAddress,
        selector: FunctionSelector,
        args: Vec<Fr>,
    },
    EmitUnencryptedLog {
        fields: Vec<Fr>,
    },
    /// Any oracle that is not available in public execution.
    PrivateOnly(OracleName),
}

impl OracleCall {
    /// Decodes a raw foreign call.
    ///
    /// Private-only oracles decode regardless of their inputs so the caller
    /// can reject them by name.
    pub fn decode(name: &str, inputs: Vec<Fr>) -> Result<Self, OracleError> {
        let oracle = OracleName::from_str(name)
            .map_err(|_| OracleError::UnknownOracle(name.to_owned()))?;

        if !oracle.is_public() {
            return Ok(Self::PrivateOnly(oracle));
        }

        let call = match oracle {
            OracleName::DebugLog => Self::DebugLog { fields: inputs },
            OracleName::EmitUnencryptedLog => Self::EmitUnencryptedLog { fields: inputs },
            OracleName::GetL1ToL2Message => Self::GetL1ToL2Message {
                message_key: first(oracle, &inputs)?,
            },
            OracleName::GetCommitment => Self::GetCommitment {
                commitment: first(oracle, &inputs)?,
            },
            OracleName::StorageRead => Self::StorageRead {
                slot: first(oracle, &inputs)?,
            },
            OracleName::StorageWrite => {
                require(oracle, &inputs, 2)?;
                Self::StorageWrite {
                    slot: inputs[0],
                    value: inputs[1],
                }
            }
            OracleName::CreateCommitment => Self::CreateCommitment {
                commitment: first(oracle, &inputs)?,
            },
            OracleName::CreateL2ToL1Message => Self::CreateL2ToL1Message {
                message: first(oracle, &inputs)?,
            },
            OracleName::CreateNullifier => Self::CreateNullifier {
                nullifier: first(oracle, &inputs)?,
            },
            OracleName::CallPublicFunction => {
                require(oracle, &inputs, 2)?;
                let mut inputs = inputs.into_iter();
                let target = inputs.next().map(AztecAddress::from).unwrap_or_default();
                let selector = inputs
                    .next()
                    .map(FunctionSelector::from_field)
                    .unwrap_or_default();
                Self::CallPublicFunction {
                    target,
                    selector,
                    args: inputs.collect(),
                }
            }
            private => Self::PrivateOnly(private),
        };

        Ok(call)
    }

    /// Name of the oracle this call was decoded from.
    pub fn name(&self) -> OracleName {
        match self {
            Self::DebugLog { .. } => OracleName::DebugLog,
            Self::GetL1ToL2Message { .. } => OracleName::GetL1ToL2Message,
            Self::GetCommitment { .. } => OracleName::GetCommitment,
            Self::StorageRead { .. } => OracleName::StorageRead,
            Self::StorageWrite { .. } => OracleName::StorageWrite,
            Self::CreateCommitment { .. } => OracleName::CreateCommitment,
            Self::CreateL2ToL1Message { .. } => OracleName::CreateL2ToL1Message,
            Self::CreateNullifier { .. } => OracleName::CreateNullifier,
            Self::CallPublicFunction { .. } => OracleName::CallPublicFunction,
            Self::EmitUnencryptedLog { .. } => OracleName::EmitUnencryptedLog,
            Self::PrivateOnly(name) => *name,
        }
    }
}

fn require(oracle: OracleName, inputs: &[Fr], expected: usize) -> Result<(), OracleError> {
    if inputs.len() < expected {
        return Err(OracleError::InsufficientInputs {
            oracle,
            expected,
            actual: inputs.len(),
        });
    }
    Ok(())
}

fn first(oracle: OracleName, inputs: &[Fr]) -> Result<Fr, OracleError> {
    require(oracle, inputs, 1)?;
    Ok(inputs[0])
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn every_name_round_trips_through_its_vm_spelling() {
        for oracle in OracleName::iter() {
            let spelled = oracle.to_string();
            assert_eq!(spelled.parse::<OracleName>().unwrap(), oracle);
        }
        assert_eq!(OracleName::GetNotes.as_ref(), "getNotes2");
        assert_eq!(
            OracleName::CreateL2ToL1Message.as_ref(),
            "createL2ToL1Message"
        );
    }

    #[test]
    fn private_oracles_decode_without_inputs() {
        for oracle in OracleName::iter().filter(|o| !o.is_public()) {
            let call = OracleCall::decode(oracle.as_ref(), vec![]).unwrap();
            assert_eq!(call, OracleCall::PrivateOnly(oracle));
            assert_eq!(call.name(), oracle);
        }
    }

    #[test]
    fn public_oracle_count_matches_dispatch_table() {
        assert_eq!(OracleName::iter().filter(|o| o.is_public()).count(), 10);
        assert_eq!(OracleName::iter().filter(|o| !o.is_public()).count(), 9);
    }

    #[test]
    fn storage_write_takes_slot_then_value() {
        let call =
            OracleCall::decode("storageWrite", vec![Fr::from(3u64), Fr::from(9u64)]).unwrap();
        assert_eq!(
            call,
            OracleCall::StorageWrite {
                slot: Fr::from(3u64),
                value: Fr::from(9u64)
            }
        );
    }

    #[test]
    fn call_public_function_splits_target_selector_and_args() {
        let inputs = vec![
            Fr::from(77u64),
            FunctionSelector::from(0xaabbccdd).to_field(),
            Fr::from(1u64),
            Fr::from(2u64),
        ];
        let call = OracleCall::decode("callPublicFunction", inputs).unwrap();
        assert_eq!(
            call,
            OracleCall::CallPublicFunction {
                target: AztecAddress::from(77),
                selector: FunctionSelector::from(0xaabbccdd),
                args: vec![Fr::from(1u64), Fr::from(2u64)],
            }
        );
    }

    #[test]
    fn short_inputs_are_rejected() {
        assert_eq!(
            OracleCall::decode("storageWrite", vec![Fr::from(1u64)]),
            Err(OracleError::InsufficientInputs {
                oracle: OracleName::StorageWrite,
                expected: 2,
                actual: 1,
            })
        );
        assert!(OracleCall::decode("storageRead", vec![]).is_err());
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            OracleCall::decode("selfDestruct", vec![]),
            Err(OracleError::UnknownOracle("selfDestruct".into()))
        );
    }

    #[test]
    fn log_oracles_accept_empty_inputs() {
        assert_eq!(
            OracleCall::decode("emitUnencryptedLog", vec![]).unwrap(),
            OracleCall::EmitUnencryptedLog { fields: vec![] }
        );
        assert_eq!(
            OracleCall::decode("debugLog", vec![]).unwrap(),
            OracleCall::DebugLog { fields: vec![] }
        );
    }
}
