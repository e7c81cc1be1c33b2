//! Circuit VM seam.
//!
//! The executor never interprets bytecode itself. It hands the bytecode and
//! an initial witness to an [`Acvm`] and answers the VM's foreign calls
//! through a [`ForeignCallHandler`] until the program completes. The VM
//! suspends on each foreign call and resumes with the handler's output, so
//! oracle calls within a frame are strictly sequential.
#[cfg(feature = "stub")]
mod stub;

#[cfg(feature = "stub")]
pub use stub::{Operand, StubAcvm, StubOp, StubProgram};

use async_trait::async_trait;
use simulator_core::{Fr, WitnessIndex, WitnessMap};
use thiserror::Error;

use crate::error::ExecutorError;

/// A suspended oracle invocation: name plus flat field inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignCall {
    pub name: String,
    pub inputs: Vec<Fr>,
}

impl ForeignCall {
    pub fn new(name: impl Into<String>, inputs: Vec<Fr>) -> Self {
        Self {
            name: name.into(),
            inputs,
        }
    }
}

/// Answers foreign calls raised while a program runs.
#[async_trait]
pub trait ForeignCallHandler: Send {
    async fn handle(&mut self, call: ForeignCall) -> Result<Vec<Fr>, ExecutorError>;
}

/// A virtual machine that executes circuit bytecode to a full witness.
#[async_trait]
pub trait Acvm: Send + Sync {
    /// Runs `bytecode` to completion and returns the solved witness.
    async fn run(
        &self,
        bytecode: &[u8],
        initial_witness: WitnessMap,
        handler: &mut dyn ForeignCallHandler,
    ) -> Result<WitnessMap, AcvmError>;

    /// Return values of a completed run, in declaration order.
    fn extract_return_witness(
        &self,
        bytecode: &[u8],
        witness: &WitnessMap,
    ) -> Result<Vec<Fr>, AcvmError>;
}

#[derive(Debug, Error)]
pub enum AcvmError {
    #[error("malformed bytecode: {0}")]
    MalformedBytecode(String),

    #[error("unsatisfied constraint: {0}")]
    UnsatisfiedConstraint(String),

    #[error("witness {0} was read before being assigned")]
    MissingWitness(WitnessIndex),

    #[error("foreign call `{name}` returned {actual} values, program expects {expected}")]
    ForeignCallArity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("foreign call `{name}` failed")]
    ForeignCall {
        name: String,
        #[source]
        source: Box<ExecutorError>,
    },
}
