//! Unified error type surfaced by the public executor.
//!
//! Every failure is fatal for the whole call tree: a failing nested call
//! fails its parent, which has no recovery path. Failures raised after a
//! frame's bytecode was resolved are wrapped in [`ExecutorError::Frame`] so
//! the chain of `Frame` layers spells out the call path to the culprit.
use simulator_core::{AbiError, AztecAddress, FunctionSelector, OracleError, OracleName};
use thiserror::Error;

use crate::acvm::AcvmError;
pub use crate::db::DbError;

pub type Result<T> = std::result::Result<T, ExecutorError>;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("bytecode not found for {address}:{selector}")]
    BytecodeNotFound {
        address: AztecAddress,
        selector: FunctionSelector,
    },

    /// Public bytecode invoked an oracle reserved for private execution.
    #[error("oracle `{oracle}` is not available for public execution")]
    ProtocolViolation { oracle: OracleName },

    /// A nested call would run deeper than `ExecutorConfig::max_call_depth`.
    #[error("call to {address}:{selector} at depth {depth} exceeds the maximum call depth")]
    CallDepthExceeded {
        address: AztecAddress,
        selector: FunctionSelector,
        depth: usize,
    },

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("virtual machine failure")]
    VirtualMachine(#[source] AcvmError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("public executor requires {0} to be configured before building")]
    MissingCollaborator(&'static str),

    #[error("public call {address}:{selector} failed")]
    Frame {
        address: AztecAddress,
        selector: FunctionSelector,
        #[source]
        source: Box<ExecutorError>,
    },
}

impl ExecutorError {
    /// Wraps this error with the identity of the frame it escaped from.
    pub fn in_frame(self, address: AztecAddress, selector: FunctionSelector) -> Self {
        Self::Frame {
            address,
            selector,
            source: Box::new(self),
        }
    }

    /// The underlying failure with every [`ExecutorError::Frame`] layer removed.
    pub fn root_cause(&self) -> &ExecutorError {
        match self {
            Self::Frame { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Frames the error passed through, outermost first.
    pub fn call_path(&self) -> Vec<(AztecAddress, FunctionSelector)> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Frame {
            address,
            selector,
            source,
        } = current
        {
            path.push((*address, *selector));
            current = source;
        }
        path
    }
}

impl From<AcvmError> for ExecutorError {
    /// A failing oracle handler surfaces as its own error, not as a VM fault.
    fn from(error: AcvmError) -> Self {
        match error {
            AcvmError::ForeignCall { source, .. } => *source,
            other => Self::VirtualMachine(other),
        }
    }
}
