//! Shared fixtures for executor integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use public_executor::{
    ExecutorConfig, InMemoryCommitmentsDb, InMemoryContractsDb, InMemoryPublicStateDb, Operand,
    PublicExecutor, StubProgram,
};
use simulator_core::{
    AztecAddress, CallContext, EthAddress, Fr, FunctionData, FunctionSelector, HistoricTreeRoots,
    PublicExecution,
};

/// Witness indices of the context fields with the default start index of 1.
pub mod slot {
    pub const MSG_SENDER: u32 = 1;
    pub const STORAGE_ADDRESS: u32 = 2;
    pub const PORTAL: u32 = 3;
    pub const IS_DELEGATE: u32 = 4;
    pub const IS_STATIC: u32 = 5;
    pub const IS_DEPLOYMENT: u32 = 6;
    pub const PRIVATE_DATA_ROOT: u32 = 7;
    pub const NULLIFIER_ROOT: u32 = 8;
    pub const CONTRACT_ROOT: u32 = 9;
    pub const L1_TO_L2_ROOT: u32 = 10;
    /// First argument.
    pub const ARG0: u32 = 11;
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn fr(value: u64) -> Fr {
    Fr::from(value)
}

pub fn w(index: u32) -> Operand {
    Operand::witness(index)
}

pub fn c(value: u64) -> Operand {
    Operand::constant(value)
}

pub fn text(s: &str) -> Vec<Operand> {
    s.bytes().map(|b| c(u64::from(b))).collect()
}

pub fn address(value: u64) -> AztecAddress {
    AztecAddress::from(value)
}

pub fn selector(value: u32) -> FunctionSelector {
    FunctionSelector::from(value)
}

/// Inputs of a `callPublicFunction` oracle: target, selector, args.
pub fn call_inputs(target: u64, sel: u32, args: &[Operand]) -> Vec<Operand> {
    let mut inputs = vec![c(target), Operand::Const(selector(sel).to_field())];
    inputs.extend_from_slice(args);
    inputs
}

pub fn roots() -> HistoricTreeRoots {
    HistoricTreeRoots {
        private_data_tree_root: fr(0x1001),
        nullifier_tree_root: fr(0x1002),
        contract_tree_root: fr(0x1003),
        l1_to_l2_messages_tree_root: fr(0x1004),
    }
}

/// Top-level request as a sequencer would submit it.
pub fn request(contract: u64, sel: u32, args: &[u64]) -> PublicExecution {
    let contract_address = address(contract);
    PublicExecution {
        contract_address,
        function_data: FunctionData::public(selector(sel)),
        args: args.iter().copied().map(Fr::from).collect(),
        call_context: CallContext {
            msg_sender: address(0xa11ce),
            storage_contract_address: contract_address,
            portal_contract_address: EthAddress::ZERO,
            is_delegate_call: false,
            is_static_call: false,
            is_contract_deployment: false,
        },
    }
}

/// In-memory stores plus helpers for deploying stub programs.
pub struct Harness {
    pub state: Arc<InMemoryPublicStateDb>,
    pub contracts: Arc<InMemoryContractsDb>,
    pub commitments: Arc<InMemoryCommitmentsDb>,
}

impl Harness {
    pub fn new() -> Self {
        init_tracing();
        Self {
            state: Arc::new(InMemoryPublicStateDb::new()),
            contracts: Arc::new(InMemoryContractsDb::new()),
            commitments: Arc::new(InMemoryCommitmentsDb::new(roots())),
        }
    }

    pub fn deploy(&self, contract: u64, sel: u32, program: StubProgram) {
        let bytecode = program.to_bytecode().expect("stub program should encode");
        self.contracts
            .register_function(address(contract), selector(sel), bytecode)
            .expect("register function");
    }

    pub fn storage(&self, contract: u64, slot: u64) -> Fr {
        self.state
            .get(address(contract), fr(slot))
            .expect("state lock should not be poisoned")
    }

    pub fn set_storage(&self, contract: u64, slot: u64, value: u64) {
        self.state
            .set(address(contract), fr(slot), fr(value))
            .expect("state lock should not be poisoned");
    }

    pub fn executor(&self) -> PublicExecutor {
        self.executor_with(ExecutorConfig::default())
    }

    pub fn executor_with(&self, config: ExecutorConfig) -> PublicExecutor {
        PublicExecutor::builder()
            .state_db(self.state.clone())
            .contracts_db(self.contracts.clone())
            .commitments_db(self.commitments.clone())
            .config(config)
            .build()
            .expect("all collaborators are configured")
    }
}
