//! Failure propagation through the call tree.
mod common;

use std::sync::Arc;

use common::*;
use public_executor::{
    AcvmError, ExecutorConfig, ExecutorError, InMemoryCommitmentsDb, InMemoryContractsDb,
    InMemoryPublicStateDb, PublicExecutor, StubProgram,
};
use simulator_core::AbiError;

const VAULT: u64 = 0x7a01;
const LEDGER: u64 = 0x7a02;
const AUDIT: u64 = 0x7a03;

const WITHDRAW: u32 = 0x2e1a7d4d;
const RECORD: u32 = 0x0000beef;
const CHECK: u32 = 0x0000c4ec;

#[tokio::test]
async fn test_missing_top_level_bytecode() {
    let harness = Harness::new();

    let err = harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[]))
        .await
        .expect_err("nothing is deployed");

    assert!(matches!(
        err,
        ExecutorError::BytecodeNotFound { address: a, selector: s }
            if a == address(VAULT) && s == selector(WITHDRAW)
    ));
    assert!(err.call_path().is_empty());
}

#[tokio::test]
async fn test_missing_nested_bytecode_fails_the_caller() {
    let harness = Harness::new();
    let vault = StubProgram::new()
        .call("createCommitment", [c(1)], [20])
        .call("callPublicFunction", call_inputs(LEDGER, RECORD, &[]), 30..34)
        .returns([20]);
    harness.deploy(VAULT, WITHDRAW, vault);

    let err = harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[]))
        .await
        .expect_err("ledger is not deployed");

    assert!(matches!(
        err.root_cause(),
        ExecutorError::BytecodeNotFound { address: a, .. } if *a == address(LEDGER)
    ));
    assert_eq!(err.call_path(), vec![(address(VAULT), selector(WITHDRAW))]);
}

#[tokio::test]
async fn test_deep_failure_reports_full_call_path() {
    let harness = Harness::new();
    harness.deploy(
        VAULT,
        WITHDRAW,
        StubProgram::new().call("callPublicFunction", call_inputs(LEDGER, RECORD, &[]), 30..34),
    );
    harness.deploy(
        LEDGER,
        RECORD,
        StubProgram::new().call("callPublicFunction", call_inputs(AUDIT, CHECK, &[c(5)]), 30..34),
    );
    harness.deploy(
        AUDIT,
        CHECK,
        StubProgram::new().assert_eq(w(slot::ARG0), c(6)),
    );

    let err = harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[]))
        .await
        .expect_err("audit constraint fails");

    assert!(matches!(
        err.root_cause(),
        ExecutorError::VirtualMachine(AcvmError::UnsatisfiedConstraint(_))
    ));
    assert_eq!(
        err.call_path(),
        vec![
            (address(VAULT), selector(WITHDRAW)),
            (address(LEDGER), selector(RECORD)),
            (address(AUDIT), selector(CHECK)),
        ]
    );
    let message = err.to_string();
    assert!(message.contains("failed"), "{message}");
}

#[tokio::test]
async fn test_writes_before_a_failure_are_not_rolled_back() {
    let harness = Harness::new();
    let vault = StubProgram::new()
        .call("storageWrite", [c(1), c(50)], [20])
        .assert_eq(c(1), c(2));
    harness.deploy(VAULT, WITHDRAW, vault);

    harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[]))
        .await
        .expect_err("constraint fails after the write");

    assert_eq!(harness.storage(VAULT, 1), fr(50));
}

#[tokio::test]
async fn test_malformed_bytecode_is_a_vm_failure() {
    let harness = Harness::new();
    harness
        .contracts
        .register_function(address(VAULT), selector(WITHDRAW), vec![0xde, 0xad])
        .expect("register function");

    let err = harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[]))
        .await
        .expect_err("bytecode does not decode");

    assert!(matches!(
        err.root_cause(),
        ExecutorError::VirtualMachine(AcvmError::MalformedBytecode(_))
    ));
}

#[tokio::test]
async fn test_wrong_argument_count_surfaces_from_the_vm() {
    let harness = Harness::new();
    harness.deploy(
        VAULT,
        WITHDRAW,
        StubProgram::new().returns([slot::ARG0 + 1]),
    );

    let err = harness
        .executor()
        .execute(request(VAULT, WITHDRAW, &[1]))
        .await
        .expect_err("second argument is missing");

    assert!(matches!(
        err.root_cause(),
        ExecutorError::VirtualMachine(AcvmError::MissingWitness(_))
    ));
}

#[tokio::test]
async fn test_witness_start_index_without_room_is_rejected() {
    let harness = Harness::new();
    harness.deploy(VAULT, WITHDRAW, StubProgram::new());

    let mut config = ExecutorConfig::default();
    config.constants.witness_start_index = u32::MAX - 10;
    let executor = harness.executor_with(config);

    executor
        .execute(request(VAULT, WITHDRAW, &[1]))
        .await
        .expect("eleven fields end exactly at the last index");

    let err = executor
        .execute(request(VAULT, WITHDRAW, &[1, 2]))
        .await
        .expect_err("the second argument has no index left");

    assert!(matches!(
        err.root_cause(),
        ExecutorError::Abi(AbiError::WitnessIndexOverflow { count: 12, .. })
    ));
    assert_eq!(err.call_path(), vec![(address(VAULT), selector(WITHDRAW))]);
}

#[test]
fn test_builder_requires_every_store() {
    let err = PublicExecutor::builder()
        .state_db(Arc::new(InMemoryPublicStateDb::new()))
        .contracts_db(Arc::new(InMemoryContractsDb::new()))
        .build()
        .err()
        .expect("commitments store is missing");
    assert!(matches!(err, ExecutorError::MissingCollaborator(_)));

    let executor = PublicExecutor::builder()
        .state_db(Arc::new(InMemoryPublicStateDb::new()))
        .contracts_db(Arc::new(InMemoryContractsDb::new()))
        .commitments_db(Arc::new(InMemoryCommitmentsDb::new(roots())))
        .build()
        .expect("stub VM is the default");
    assert_eq!(executor.tree_roots(), roots());
}
