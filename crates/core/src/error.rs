//! Error types for request validation, log framing and state-diff packing.
//!
//! Oracle decoding failures live with the oracle module in
//! [`crate::oracle::OracleError`].

/// A public call request violates a kernel precondition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    #[error("contract deployment can't be a public function")]
    ContractDeployment,

    #[error("contract address must be non-zero")]
    ZeroContractAddress,

    #[error("function selector must be non-zero")]
    EmptySelector,

    #[error("constructors can't be public functions")]
    Constructor,

    #[error("cannot execute a private function as public")]
    PrivateFunction,

    #[error("{count} witness values starting at index {start} overflow the witness index space")]
    WitnessIndexOverflow { start: u32, count: usize },
}

/// Unencrypted logs can't be framed with `u32` length prefixes.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LogsError {
    #[error("{len} bytes of logs exceed the u32 length prefix")]
    TooLong { len: usize },
}

/// A frame's storage actions do not fit the kernel's fixed-size arrays.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateDiffError {
    #[error("frame issued {count} storage reads but the kernel accepts {capacity}")]
    TooManyReads { count: usize, capacity: usize },

    #[error("frame issued {count} storage writes but the kernel accepts {capacity}")]
    TooManyWrites { count: usize, capacity: usize },
}
