//! Public function execution for L2 rollup transactions.
//!
//! This crate runs public contract functions against shared world state,
//! answering the circuit VM's oracle calls and recursing into nested public
//! calls. Consumers build a [`PublicExecutor`] from their stores and a VM and
//! call [`PublicExecutor::execute`] to get a [`PublicExecutionResult`] tree.
//!
//! Modules are organized by responsibility:
//! - [`executor`] hosts the executor and its builder
//! - [`acvm`] defines the VM seam (and the `stub` VM used in tests)
//! - [`db`] defines the store traits plus in-memory implementations
//! - [`collector`] records each frame's storage actions
//! - [`config`] loads protocol constants from the environment
pub mod acvm;
pub mod collector;
pub mod config;
pub mod db;
pub mod error;
pub mod executor;

mod oracle;

pub use acvm::{Acvm, AcvmError, ForeignCall, ForeignCallHandler};
#[cfg(feature = "stub")]
pub use acvm::{Operand, StubAcvm, StubOp, StubProgram};
pub use collector::ContractStorageActionsCollector;
pub use config::ExecutorConfig;
pub use db::{
    CommitmentsDb, DbError, InMemoryCommitmentsDb, InMemoryContractsDb, InMemoryPublicStateDb,
    PublicContractsDb, PublicStateDb,
};
pub use error::{ExecutorError, Result};
pub use executor::{BoxFuture, PublicExecutor, PublicExecutorBuilder};

pub use simulator_core::{PublicExecution, PublicExecutionResult};
