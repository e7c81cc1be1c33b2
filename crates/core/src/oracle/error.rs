//! Oracle decoding errors.

use super::OracleName;

/// Errors raised while decoding a foreign call issued by the VM.
///
/// Both variants mean the bytecode and the simulator disagree on the oracle
/// ABI, so callers treat them as fatal for the frame.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// The VM invoked a name that no oracle answers to.
    #[error("unknown oracle `{0}`")]
    UnknownOracle(String),

    /// The VM passed fewer inputs than the oracle reads.
    #[error("oracle `{oracle}` expects at least {expected} inputs, got {actual}")]
    InsufficientInputs {
        oracle: OracleName,
        expected: usize,
        actual: usize,
    },
}
