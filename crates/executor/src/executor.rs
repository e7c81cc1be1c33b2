//! Public function executor and builder.
//!
//! [`PublicExecutor`] runs one public function to completion: it resolves the
//! bytecode, builds the initial witness, runs the VM with a fresh oracle
//! dispatch table for the frame, and packages the frame's outputs.
//! Nested public calls re-enter the executor from the dispatch table, so a
//! single `execute` produces a whole result tree.
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use simulator_core::{
    AztecAddress, CallContext, EthAddress, Fr, FunctionData, FunctionSelector, HistoricTreeRoots,
    PublicExecution, PublicExecutionResult, WitnessMap, build_initial_witness,
};
use tracing::{Instrument, debug, debug_span, info, warn};

use crate::acvm::Acvm;
use crate::config::ExecutorConfig;
use crate::db::{CommitmentsDb, PublicContractsDb, PublicStateDb};
use crate::error::{ExecutorError, Result};
use crate::oracle::{FrameOutputs, PublicOracleDispatch};

/// Boxed future returned by the recursive entry points.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Executes public functions against shared world state.
///
/// The historic tree roots are captured once, when the executor is built,
/// and every frame of every call tree it runs sees the same snapshot.
pub struct PublicExecutor {
    state_db: Arc<dyn PublicStateDb>,
    contracts_db: Arc<dyn PublicContractsDb>,
    commitments_db: Arc<dyn CommitmentsDb>,
    acvm: Arc<dyn Acvm>,
    tree_roots: HistoricTreeRoots,
    config: ExecutorConfig,
}

impl PublicExecutor {
    pub fn new(
        state_db: Arc<dyn PublicStateDb>,
        contracts_db: Arc<dyn PublicContractsDb>,
        commitments_db: Arc<dyn CommitmentsDb>,
        acvm: Arc<dyn Acvm>,
        config: ExecutorConfig,
    ) -> Self {
        let tree_roots = commitments_db.get_tree_roots();
        Self {
            state_db,
            contracts_db,
            commitments_db,
            acvm,
            tree_roots,
            config,
        }
    }

    pub fn builder() -> PublicExecutorBuilder {
        PublicExecutorBuilder::new()
    }

    pub fn tree_roots(&self) -> HistoricTreeRoots {
        self.tree_roots
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub(crate) fn state_db(&self) -> &dyn PublicStateDb {
        self.state_db.as_ref()
    }

    pub(crate) fn commitments_db(&self) -> &dyn CommitmentsDb {
        self.commitments_db.as_ref()
    }

    /// Executes a public function and every public call it makes.
    ///
    /// Any failure anywhere in the call tree fails the whole execution; no
    /// partial result is returned. Storage writes already persisted before
    /// the failure are not rolled back here.
    pub fn execute(
        &self,
        execution: PublicExecution,
    ) -> BoxFuture<'_, Result<PublicExecutionResult>> {
        self.execute_at_depth(execution, 0)
    }

    fn execute_at_depth(
        &self,
        execution: PublicExecution,
        depth: usize,
    ) -> BoxFuture<'_, Result<PublicExecutionResult>> {
        let span = debug_span!(
            "public_frame",
            address = %execution.contract_address,
            selector = %execution.selector(),
            depth
        );
        Box::pin(self.run_frame(execution, depth).instrument(span))
    }

    /// Builds the nested request for a `callPublicFunction` oracle and runs it.
    ///
    /// The callee sees the caller's storage address as `msg_sender` and its
    /// own portal, or the zero address if it has none. `depth` is the callee's
    /// depth; past `max_call_depth` the call fails before anything is resolved.
    pub(crate) fn call_public_function(
        &self,
        target: AztecAddress,
        selector: FunctionSelector,
        args: Vec<Fr>,
        caller: &CallContext,
        depth: usize,
    ) -> BoxFuture<'_, Result<PublicExecutionResult>> {
        let caller = *caller;
        Box::pin(async move {
            if depth > self.config.max_call_depth {
                warn!(callee = %target, %selector, depth, "maximum call depth exceeded");
                return Err(ExecutorError::CallDepthExceeded {
                    address: target,
                    selector,
                    depth,
                });
            }

            let portal = self
                .contracts_db
                .get_portal_contract_address(target)
                .await?
                .unwrap_or(EthAddress::ZERO);

            let execution = PublicExecution {
                contract_address: target,
                function_data: FunctionData::public(selector),
                args,
                call_context: CallContext::nested(&caller, target, portal),
            };
            self.execute_at_depth(execution, depth).await
        })
    }

    async fn run_frame(
        &self,
        execution: PublicExecution,
        depth: usize,
    ) -> Result<PublicExecutionResult> {
        let address = execution.contract_address;
        let selector = execution.selector();
        if depth == 0 {
            info!(%address, %selector, args = execution.args.len(), "executing public function");
        } else {
            debug!(args = execution.args.len(), "entering nested frame");
        }

        let bytecode = self
            .contracts_db
            .get_bytecode(address, selector)
            .await?
            .ok_or(ExecutorError::BytecodeNotFound { address, selector })?;

        let initial_witness = build_initial_witness(
            &execution.args,
            &execution.call_context,
            &self.tree_roots,
            self.config.constants.witness_start_index,
        )
        .map_err(|error| ExecutorError::from(error).in_frame(address, selector))?;

        let mut dispatch = PublicOracleDispatch::new(self, &execution, depth);
        let return_values = self
            .solve(&bytecode, initial_witness, &mut dispatch)
            .await
            .map_err(|error| error.in_frame(address, selector))?;
        let FrameOutputs {
            effects,
            storage_reads,
            storage_updates,
        } = dispatch.finish();

        debug!(
            returned = return_values.len(),
            reads = storage_reads.len(),
            writes = storage_updates.len(),
            nested = effects.nested_executions.len(),
            "frame complete"
        );

        Ok(PublicExecutionResult {
            execution,
            new_commitments: effects.new_commitments,
            new_l2_to_l1_messages: effects.new_l2_to_l1_messages,
            new_nullifiers: effects.new_nullifiers,
            contract_storage_reads: storage_reads,
            contract_storage_update_requests: storage_updates,
            return_values,
            nested_executions: effects.nested_executions,
            unencrypted_logs: effects.unencrypted_logs,
        })
    }

    async fn solve(
        &self,
        bytecode: &[u8],
        initial_witness: WitnessMap,
        dispatch: &mut PublicOracleDispatch<'_>,
    ) -> Result<Vec<Fr>> {
        let witness = self.acvm.run(bytecode, initial_witness, dispatch).await?;
        Ok(self.acvm.extract_return_witness(bytecode, &witness)?)
    }
}

/// Builder for [`PublicExecutor`].
pub struct PublicExecutorBuilder {
    state_db: Option<Arc<dyn PublicStateDb>>,
    contracts_db: Option<Arc<dyn PublicContractsDb>>,
    commitments_db: Option<Arc<dyn CommitmentsDb>>,
    acvm: Option<Arc<dyn Acvm>>,
    config: ExecutorConfig,
}

impl PublicExecutorBuilder {
    fn new() -> Self {
        Self {
            state_db: None,
            contracts_db: None,
            commitments_db: None,
            acvm: None,
            config: ExecutorConfig::default(),
        }
    }

    /// Override executor configuration
    pub fn config(mut self, config: ExecutorConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required world-state store
    pub fn state_db(mut self, db: Arc<dyn PublicStateDb>) -> Self {
        self.state_db = Some(db);
        self
    }

    /// Set required contracts directory
    pub fn contracts_db(mut self, db: Arc<dyn PublicContractsDb>) -> Self {
        self.contracts_db = Some(db);
        self
    }

    /// Set required commitments store
    pub fn commitments_db(mut self, db: Arc<dyn CommitmentsDb>) -> Self {
        self.commitments_db = Some(db);
        self
    }

    /// Set the virtual machine (defaults to the stub VM when built with `stub`)
    pub fn acvm(mut self, acvm: Arc<dyn Acvm>) -> Self {
        self.acvm = Some(acvm);
        self
    }

    /// Build the executor, snapshotting the commitments store's tree roots
    pub fn build(self) -> Result<PublicExecutor> {
        let state_db = self
            .state_db
            .ok_or(ExecutorError::MissingCollaborator("a public state store"))?;
        let contracts_db = self
            .contracts_db
            .ok_or(ExecutorError::MissingCollaborator("a contracts directory"))?;
        let commitments_db = self
            .commitments_db
            .ok_or(ExecutorError::MissingCollaborator("a commitments store"))?;
        let acvm = match self.acvm {
            Some(acvm) => acvm,
            None => default_acvm()?,
        };

        Ok(PublicExecutor::new(
            state_db,
            contracts_db,
            commitments_db,
            acvm,
            self.config,
        ))
    }
}

#[cfg(feature = "stub")]
fn default_acvm() -> Result<Arc<dyn Acvm>> {
    Ok(Arc::new(crate::acvm::StubAcvm::new()))
}

#[cfg(not(feature = "stub"))]
fn default_acvm() -> Result<Arc<dyn Acvm>> {
    Err(ExecutorError::MissingCollaborator("a virtual machine"))
}
