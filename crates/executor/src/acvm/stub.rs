//! Deterministic stub VM for development and tests.
//!
//! Bytecode is a bincode-encoded [`StubProgram`]: a straight-line list of
//! ops over witness indices plus the witnesses returned on completion.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use simulator_core::{Fr, WitnessIndex, WitnessMap};
use tracing::trace;

use super::{Acvm, AcvmError, ForeignCall, ForeignCallHandler};

/// Value source for an op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Witness(WitnessIndex),
    Const(Fr),
}

impl Operand {
    pub fn witness(index: u32) -> Self {
        Self::Witness(WitnessIndex(index))
    }

    pub fn constant(value: impl Into<Fr>) -> Self {
        Self::Const(value.into())
    }

    fn resolve(&self, witness: &WitnessMap) -> Result<Fr, AcvmError> {
        match self {
            Self::Witness(index) => witness.get(*index).ok_or(AcvmError::MissingWitness(*index)),
            Self::Const(value) => Ok(*value),
        }
    }
}

impl From<WitnessIndex> for Operand {
    fn from(index: WitnessIndex) -> Self {
        Self::Witness(index)
    }
}

impl From<Fr> for Operand {
    fn from(value: Fr) -> Self {
        Self::Const(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StubOp {
    Assign {
        target: WitnessIndex,
        value: Operand,
    },
    Add {
        target: WitnessIndex,
        lhs: Operand,
        rhs: Operand,
    },
    AssertEq {
        lhs: Operand,
        rhs: Operand,
    },
    /// Suspends into the foreign-call handler. The first `outputs.len()`
    /// returned values are assigned in order; surplus values are dropped.
    Call {
        oracle: String,
        inputs: Vec<Operand>,
        outputs: Vec<WitnessIndex>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubProgram {
    pub ops: Vec<StubOp>,
    pub return_witnesses: Vec<WitnessIndex>,
}

impl StubProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(mut self, target: u32, value: impl Into<Operand>) -> Self {
        self.ops.push(StubOp::Assign {
            target: WitnessIndex(target),
            value: value.into(),
        });
        self
    }

    pub fn add(mut self, target: u32, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        self.ops.push(StubOp::Add {
            target: WitnessIndex(target),
            lhs: lhs.into(),
            rhs: rhs.into(),
        });
        self
    }

    pub fn assert_eq(mut self, lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Self {
        self.ops.push(StubOp::AssertEq {
            lhs: lhs.into(),
            rhs: rhs.into(),
        });
        self
    }

    pub fn call(
        mut self,
        oracle: impl Into<String>,
        inputs: impl IntoIterator<Item = Operand>,
        outputs: impl IntoIterator<Item = u32>,
    ) -> Self {
        self.ops.push(StubOp::Call {
            oracle: oracle.into(),
            inputs: inputs.into_iter().collect(),
            outputs: outputs.into_iter().map(WitnessIndex).collect(),
        });
        self
    }

    pub fn returns(mut self, witnesses: impl IntoIterator<Item = u32>) -> Self {
        self.return_witnesses = witnesses.into_iter().map(WitnessIndex).collect();
        self
    }

    pub fn to_bytecode(&self) -> Result<Vec<u8>, AcvmError> {
        bincode::serialize(self).map_err(|e| AcvmError::MalformedBytecode(e.to_string()))
    }

    pub fn from_bytecode(bytecode: &[u8]) -> Result<Self, AcvmError> {
        bincode::deserialize(bytecode).map_err(|e| AcvmError::MalformedBytecode(e.to_string()))
    }
}

/// Interprets [`StubProgram`] bytecode.
#[derive(Clone, Copy, Debug, Default)]
pub struct StubAcvm;

impl StubAcvm {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Acvm for StubAcvm {
    async fn run(
        &self,
        bytecode: &[u8],
        initial_witness: WitnessMap,
        handler: &mut dyn ForeignCallHandler,
    ) -> Result<WitnessMap, AcvmError> {
        let program = StubProgram::from_bytecode(bytecode)?;
        let mut witness = initial_witness;

        for (pc, op) in program.ops.into_iter().enumerate() {
            match op {
                StubOp::Assign { target, value } => {
                    let value = value.resolve(&witness)?;
                    witness.insert(target, value);
                }
                StubOp::Add { target, lhs, rhs } => {
                    let sum = lhs.resolve(&witness)? + rhs.resolve(&witness)?;
                    witness.insert(target, sum);
                }
                StubOp::AssertEq { lhs, rhs } => {
                    let (lhs, rhs) = (lhs.resolve(&witness)?, rhs.resolve(&witness)?);
                    if lhs != rhs {
                        return Err(AcvmError::UnsatisfiedConstraint(format!(
                            "op {pc}: {lhs} != {rhs}"
                        )));
                    }
                }
                StubOp::Call {
                    oracle,
                    inputs,
                    outputs,
                } => {
                    let inputs = inputs
                        .iter()
                        .map(|operand| operand.resolve(&witness))
                        .collect::<Result<Vec<_>, _>>()?;
                    trace!(pc, oracle = %oracle, inputs = inputs.len(), "foreign call");

                    let values = handler
                        .handle(ForeignCall::new(oracle.clone(), inputs))
                        .await
                        .map_err(|source| AcvmError::ForeignCall {
                            name: oracle.clone(),
                            source: Box::new(source),
                        })?;

                    if values.len() < outputs.len() {
                        return Err(AcvmError::ForeignCallArity {
                            name: oracle,
                            expected: outputs.len(),
                            actual: values.len(),
                        });
                    }
                    for (index, value) in outputs.into_iter().zip(values) {
                        witness.insert(index, value);
                    }
                }
            }
        }

        Ok(witness)
    }

    fn extract_return_witness(
        &self,
        bytecode: &[u8],
        witness: &WitnessMap,
    ) -> Result<Vec<Fr>, AcvmError> {
        let program = StubProgram::from_bytecode(bytecode)?;
        program
            .return_witnesses
            .iter()
            .map(|index| witness.get(*index).ok_or(AcvmError::MissingWitness(*index)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecutorError;
    use simulator_core::OracleName;

    /// Records calls and answers each with a fixed response.
    struct Scripted {
        calls: Vec<ForeignCall>,
        response: Vec<Fr>,
    }

    impl Scripted {
        fn answering(response: Vec<Fr>) -> Self {
            Self {
                calls: Vec::new(),
                response,
            }
        }
    }

    #[async_trait]
    impl ForeignCallHandler for Scripted {
        async fn handle(&mut self, call: ForeignCall) -> Result<Vec<Fr>, ExecutorError> {
            self.calls.push(call);
            Ok(self.response.clone())
        }
    }

    struct Rejecting;

    #[async_trait]
    impl ForeignCallHandler for Rejecting {
        async fn handle(&mut self, _call: ForeignCall) -> Result<Vec<Fr>, ExecutorError> {
            Err(ExecutorError::ProtocolViolation {
                oracle: OracleName::GetSecretKey,
            })
        }
    }

    async fn run(program: StubProgram, handler: &mut dyn ForeignCallHandler) -> Result<Vec<Fr>, AcvmError> {
        let bytecode = program.to_bytecode()?;
        let initial = WitnessMap::from_values(1, vec![Fr::from(3u64), Fr::from(4u64)])
            .expect("two values fit");
        let witness = StubAcvm.run(&bytecode, initial, handler).await?;
        StubAcvm.extract_return_witness(&bytecode, &witness)
    }

    #[tokio::test]
    async fn arithmetic_over_initial_witness() {
        let program = StubProgram::new()
            .add(3, WitnessIndex(1), WitnessIndex(2))
            .assert_eq(WitnessIndex(3), Fr::from(7u64))
            .assign(4, Fr::from(9u64))
            .returns([3, 4]);

        let values = run(program, &mut Scripted::answering(vec![])).await.unwrap();
        assert_eq!(values, vec![Fr::from(7u64), Fr::from(9u64)]);
    }

    #[tokio::test]
    async fn failed_assertion_is_unsatisfied_constraint() {
        let program = StubProgram::new().assert_eq(WitnessIndex(1), WitnessIndex(2));
        let err = run(program, &mut Scripted::answering(vec![])).await.unwrap_err();
        assert!(matches!(err, AcvmError::UnsatisfiedConstraint(_)));
    }

    #[tokio::test]
    async fn reading_unassigned_witness_fails() {
        let program = StubProgram::new().returns([42]);
        let err = run(program, &mut Scripted::answering(vec![])).await.unwrap_err();
        assert!(matches!(err, AcvmError::MissingWitness(WitnessIndex(42))));
    }

    #[tokio::test]
    async fn call_passes_resolved_inputs_and_assigns_outputs() {
        let mut handler = Scripted::answering(vec![Fr::from(10u64), Fr::from(11u64)]);
        let program = StubProgram::new()
            .call(
                "storageRead",
                [Operand::witness(2), Operand::constant(5u64)],
                [5],
            )
            .returns([5]);

        let values = run(program, &mut handler).await.unwrap();
        assert_eq!(values, vec![Fr::from(10u64)]);
        assert_eq!(
            handler.calls,
            vec![ForeignCall::new(
                "storageRead",
                vec![Fr::from(4u64), Fr::from(5u64)]
            )]
        );
    }

    #[tokio::test]
    async fn short_call_output_is_an_arity_error() {
        let program = StubProgram::new().call("storageRead", [], [5, 6]);
        let err = run(program, &mut Scripted::answering(vec![Fr::zero()]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AcvmError::ForeignCallArity {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn handler_error_aborts_the_run() {
        let program = StubProgram::new()
            .call("getSecretKey", [], [5])
            .assign(6, Fr::from(1u64))
            .returns([6]);
        let err = run(program, &mut Rejecting).await.unwrap_err();

        let AcvmError::ForeignCall { name, source } = err else {
            panic!("expected foreign call failure, got {err:?}");
        };
        assert_eq!(name, "getSecretKey");
        assert!(matches!(*source, ExecutorError::ProtocolViolation { .. }));
    }

    #[tokio::test]
    async fn garbage_bytecode_is_malformed() {
        let err = StubAcvm
            .run(&[0xff; 3], WitnessMap::new(), &mut Rejecting)
            .await
            .unwrap_err();
        assert!(matches!(err, AcvmError::MalformedBytecode(_)));
    }
}
