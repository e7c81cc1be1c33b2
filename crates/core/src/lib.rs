//! Protocol data model and ABI for public function simulation.
//!
//! `simulator-core` defines the types exchanged between the public executor,
//! the circuit VM, and the kernel: field elements and addresses, execution
//! requests and result trees, the initial witness layout, and typed oracle
//! calls. Everything here is pure and synchronous; storage, bytecode and the
//! VM itself live behind the traits of the `public-executor` crate.
pub mod address;
pub mod call;
pub mod config;
pub mod error;
pub mod field;
pub mod kernel;
pub mod oracle;
pub mod result;
pub mod storage;
pub mod witness;

pub use address::{AztecAddress, EthAddress, FunctionSelector};
pub use call::{CallContext, FunctionData, HistoricTreeRoots, PublicExecution};
pub use config::ProtocolConstants;
pub use error::{AbiError, LogsError, StateDiffError};
pub use field::{FieldParseError, Fr};
pub use kernel::{PublicCallStateDiff, StateRead, StateTransition};
pub use oracle::{
    CommitmentDataOracleInputs, MessageLoadOracleInputs, OracleCall, OracleError, OracleName,
    format_debug_log, pack_unencrypted_log,
};
pub use result::{FunctionL2Logs, PublicExecutionResult};
pub use storage::{
    ContractStorageRead, ContractStorageUpdateRequest, StorageAction, StorageActionLog,
};
pub use witness::{WitnessIndex, WitnessMap, build_initial_witness};
