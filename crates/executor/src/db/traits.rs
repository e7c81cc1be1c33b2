//! Collaborator contracts the executor reads and mutates world state through.
//!
//! Implementations may be backed by real databases and perform async I/O.
//! The executor never calls them concurrently: every access happens from
//! within a single oracle handler, one at a time, in program order.

use async_trait::async_trait;
use simulator_core::{
    AztecAddress, CommitmentDataOracleInputs, EthAddress, Fr, FunctionSelector,
    HistoricTreeRoots, MessageLoadOracleInputs,
};

use super::DbError;

/// Directory of deployed contracts.
#[async_trait]
pub trait PublicContractsDb: Send + Sync {
    /// Bytecode of a public function, or `None` if it is not registered.
    async fn get_bytecode(
        &self,
        address: AztecAddress,
        selector: FunctionSelector,
    ) -> Result<Option<Vec<u8>>, DbError>;

    /// L1 portal paired with a contract, if any.
    async fn get_portal_contract_address(
        &self,
        address: AztecAddress,
    ) -> Result<Option<EthAddress>, DbError>;
}

/// Public world-state storage shared by every frame of a transaction.
///
/// Writes must be visible to every subsequent read, including reads issued
/// by later frames of the same transaction.
#[async_trait]
pub trait PublicStateDb: Send + Sync {
    /// Current value of a slot; never-written slots read as zero.
    async fn storage_read(&self, contract: AztecAddress, slot: Fr) -> Result<Fr, DbError>;

    async fn storage_write(
        &self,
        contract: AztecAddress,
        slot: Fr,
        value: Fr,
    ) -> Result<(), DbError>;
}

/// Membership data for commitments and L1-to-L2 messages.
#[async_trait]
pub trait CommitmentsDb: Send + Sync {
    /// Roots snapshot; queried once when an executor is built.
    fn get_tree_roots(&self) -> HistoricTreeRoots;

    async fn get_l1_to_l2_message(
        &self,
        message_key: Fr,
    ) -> Result<MessageLoadOracleInputs, DbError>;

    async fn get_commitment_oracle(
        &self,
        address: AztecAddress,
        commitment: Fr,
    ) -> Result<CommitmentDataOracleInputs, DbError>;
}
