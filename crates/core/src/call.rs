//! Requests for public function execution and the context they run in.
use crate::address::{AztecAddress, EthAddress, FunctionSelector};
use crate::error::AbiError;
use crate::field::Fr;

/// Immutable per-call record describing who called and whose storage is used.
///
/// `is_static_call` promises no writes, but that promise is enforced by the
/// kernel circuit; the executor records whatever the bytecode does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallContext {
    pub msg_sender: AztecAddress,
    pub storage_contract_address: AztecAddress,
    pub portal_contract_address: EthAddress,
    pub is_delegate_call: bool,
    pub is_static_call: bool,
    pub is_contract_deployment: bool,
}

impl CallContext {
    /// Context of a public-to-public call: never delegate, static, or deployment.
    pub fn nested(
        caller: &CallContext,
        target: AztecAddress,
        portal_contract_address: EthAddress,
    ) -> Self {
        Self {
            msg_sender: caller.storage_contract_address,
            storage_contract_address: target,
            portal_contract_address,
            is_delegate_call: false,
            is_static_call: false,
            is_contract_deployment: false,
        }
    }
}

/// Selector plus call-kind flags of the function being invoked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionData {
    pub selector: FunctionSelector,
    pub is_private: bool,
    pub is_constructor: bool,
}

impl FunctionData {
    pub fn new(selector: FunctionSelector, is_private: bool, is_constructor: bool) -> Self {
        Self {
            selector,
            is_private,
            is_constructor,
        }
    }

    /// Plain public function data, as used for nested calls.
    pub fn public(selector: FunctionSelector) -> Self {
        Self::new(selector, false, false)
    }
}

/// Snapshot of the protocol tree roots taken once per transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistoricTreeRoots {
    pub private_data_tree_root: Fr,
    pub nullifier_tree_root: Fr,
    pub contract_tree_root: Fr,
    pub l1_to_l2_messages_tree_root: Fr,
}

/// A request to execute one public function.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicExecution {
    pub contract_address: AztecAddress,
    pub function_data: FunctionData,
    pub args: Vec<Fr>,
    pub call_context: CallContext,
}

impl PublicExecution {
    #[inline]
    pub fn selector(&self) -> FunctionSelector {
        self.function_data.selector
    }

    /// Checks the preconditions the public kernel asserts on every call.
    ///
    /// The executor itself never calls this; callers that build requests from
    /// untrusted input run it before handing the request over.
    pub fn validate(&self) -> Result<(), AbiError> {
        if self.call_context.is_contract_deployment {
            return Err(AbiError::ContractDeployment);
        }
        if self.contract_address.is_zero() {
            return Err(AbiError::ZeroContractAddress);
        }
        if self.function_data.selector.is_empty() {
            return Err(AbiError::EmptySelector);
        }
        if self.function_data.is_constructor {
            return Err(AbiError::Constructor);
        }
        if self.function_data.is_private {
            return Err(AbiError::PrivateFunction);
        }
        Ok(())
    }
}
