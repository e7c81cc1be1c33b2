//! Public-execution oracle dispatch.
//!
//! One [`PublicOracleDispatch`] serves one call frame. It owns the frame's
//! storage collector and effect sequences, answers every foreign call the VM
//! raises for that frame, and is turned into the frame's outputs once the VM
//! finishes.
use async_trait::async_trait;
use simulator_core::{
    AztecAddress, ContractStorageRead, ContractStorageUpdateRequest, Fr, FunctionL2Logs,
    FunctionSelector, OracleCall, PublicExecution, PublicExecutionResult, format_debug_log,
    pack_unencrypted_log,
};
use tracing::{debug, info, warn};

use crate::acvm::{ForeignCall, ForeignCallHandler};
use crate::collector::ContractStorageActionsCollector;
use crate::error::{ExecutorError, Result};
use crate::executor::PublicExecutor;

/// Side effects emitted by a single frame, in emission order.
#[derive(Debug, Default)]
pub(crate) struct FrameEffects {
    pub new_commitments: Vec<Fr>,
    pub new_l2_to_l1_messages: Vec<Fr>,
    pub new_nullifiers: Vec<Fr>,
    pub nested_executions: Vec<PublicExecutionResult>,
    pub unencrypted_logs: FunctionL2Logs,
}

/// Everything a frame produced besides its return values.
pub(crate) struct FrameOutputs {
    pub effects: FrameEffects,
    pub storage_reads: Vec<ContractStorageRead>,
    pub storage_updates: Vec<ContractStorageUpdateRequest>,
}

pub(crate) struct PublicOracleDispatch<'a> {
    executor: &'a PublicExecutor,
    execution: &'a PublicExecution,
    depth: usize,
    storage: ContractStorageActionsCollector<'a>,
    effects: FrameEffects,
}

impl<'a> PublicOracleDispatch<'a> {
    pub fn new(executor: &'a PublicExecutor, execution: &'a PublicExecution, depth: usize) -> Self {
        Self {
            executor,
            execution,
            depth,
            storage: ContractStorageActionsCollector::new(
                executor.state_db(),
                execution.contract_address,
            ),
            effects: FrameEffects::default(),
        }
    }

    pub fn finish(self) -> FrameOutputs {
        let (storage_reads, storage_updates) = self.storage.collect();
        FrameOutputs {
            effects: self.effects,
            storage_reads,
            storage_updates,
        }
    }

    fn contract_address(&self) -> AztecAddress {
        self.execution.contract_address
    }

    async fn dispatch(&mut self, call: OracleCall) -> Result<Vec<Fr>> {
        let roots = self.executor.tree_roots();

        match call {
            OracleCall::PrivateOnly(oracle) => Err(ExecutorError::ProtocolViolation { oracle }),

            OracleCall::DebugLog { fields } => {
                info!(target: "public_executor::oracle", "{}", format_debug_log(&fields));
                Ok(vec![Fr::zero()])
            }

            OracleCall::GetL1ToL2Message { message_key } => {
                let inputs = self
                    .executor
                    .commitments_db()
                    .get_l1_to_l2_message(message_key)
                    .await?;
                Ok(inputs.to_oracle_fields(roots.l1_to_l2_messages_tree_root))
            }

            OracleCall::GetCommitment { commitment } => {
                let inputs = self
                    .executor
                    .commitments_db()
                    .get_commitment_oracle(self.contract_address(), commitment)
                    .await?;
                Ok(inputs.to_oracle_fields(roots.private_data_tree_root))
            }

            OracleCall::StorageRead { slot } => Ok(vec![self.storage.read(slot).await?]),

            OracleCall::StorageWrite { slot, value } => {
                let new_value = self.storage.write(slot, value);
                self.executor
                    .state_db()
                    .storage_write(self.contract_address(), slot, new_value)
                    .await?;
                Ok(vec![new_value])
            }

            OracleCall::CreateCommitment { commitment } => {
                debug!(commitment = %commitment.to_short_string(), "new commitment");
                self.effects.new_commitments.push(commitment);
                Ok(vec![Fr::zero()])
            }

            OracleCall::CreateL2ToL1Message { message } => {
                debug!(message = %message.to_short_string(), "new L2 to L1 message");
                self.effects.new_l2_to_l1_messages.push(message);
                Ok(vec![Fr::zero()])
            }

            OracleCall::CreateNullifier { nullifier } => {
                debug!(nullifier = %nullifier.to_short_string(), "new nullifier");
                self.effects.new_nullifiers.push(nullifier);
                Ok(vec![Fr::zero()])
            }

            OracleCall::CallPublicFunction {
                target,
                selector,
                args,
            } => self.call_public_function(target, selector, args).await,

            OracleCall::EmitUnencryptedLog { fields } => {
                let log = pack_unencrypted_log(&fields);
                debug!(bytes = log.len(), "unencrypted log");
                self.effects.unencrypted_logs.push(log);
                Ok(vec![Fr::zero()])
            }
        }
    }

    async fn call_public_function(
        &mut self,
        target: AztecAddress,
        selector: FunctionSelector,
        args: Vec<Fr>,
    ) -> Result<Vec<Fr>> {
        debug!(callee = %target, %selector, args = args.len(), "nested public call");
        let child = self
            .executor
            .call_public_function(
                target,
                selector,
                args,
                &self.execution.call_context,
                self.depth + 1,
            )
            .await?;

        let width = self.executor.config().constants.max_return_values;
        let values = pad_return_values(&child.return_values, width);
        debug!(
            callee = %target,
            %selector,
            returned = child.return_values.len(),
            "nested call returned"
        );
        self.effects.nested_executions.push(child);
        Ok(values)
    }
}

#[async_trait]
impl ForeignCallHandler for PublicOracleDispatch<'_> {
    async fn handle(&mut self, call: ForeignCall) -> Result<Vec<Fr>> {
        let call = OracleCall::decode(&call.name, call.inputs)?;
        self.dispatch(call).await
    }
}

/// Fits a callee's return values to the caller-side fixed width.
///
/// Short results are zero-padded at the end; long results are truncated.
pub(crate) fn pad_return_values(values: &[Fr], width: usize) -> Vec<Fr> {
    if values.len() > width {
        warn!(
            returned = values.len(),
            width, "nested call returned more values than the caller can receive; truncating"
        );
    }
    let mut padded: Vec<Fr> = values.iter().copied().take(width).collect();
    padded.resize(width, Fr::zero());
    padded
}
