//! In-memory commitments store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use simulator_core::{
    AztecAddress, CommitmentDataOracleInputs, Fr, HistoricTreeRoots, MessageLoadOracleInputs,
};

use crate::db::{CommitmentsDb, DbError};

/// Fixed roots plus lookup tables for messages and commitments.
pub struct InMemoryCommitmentsDb {
    roots: HistoricTreeRoots,
    messages: RwLock<HashMap<Fr, MessageLoadOracleInputs>>,
    commitments: RwLock<HashMap<(AztecAddress, Fr), CommitmentDataOracleInputs>>,
}

impl InMemoryCommitmentsDb {
    pub fn new(roots: HistoricTreeRoots) -> Self {
        Self {
            roots,
            messages: RwLock::new(HashMap::new()),
            commitments: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert_l1_to_l2_message(
        &self,
        message_key: Fr,
        inputs: MessageLoadOracleInputs,
    ) -> Result<(), DbError> {
        let mut messages = self.messages.write().map_err(|_| DbError::LockPoisoned)?;
        messages.insert(message_key, inputs);
        Ok(())
    }

    pub fn insert_commitment(
        &self,
        address: AztecAddress,
        inputs: CommitmentDataOracleInputs,
    ) -> Result<(), DbError> {
        let mut commitments = self
            .commitments
            .write()
            .map_err(|_| DbError::LockPoisoned)?;
        commitments.insert((address, inputs.commitment), inputs);
        Ok(())
    }
}

impl Default for InMemoryCommitmentsDb {
    fn default() -> Self {
        Self::new(HistoricTreeRoots::default())
    }
}

#[async_trait]
impl CommitmentsDb for InMemoryCommitmentsDb {
    fn get_tree_roots(&self) -> HistoricTreeRoots {
        self.roots
    }

    async fn get_l1_to_l2_message(
        &self,
        message_key: Fr,
    ) -> Result<MessageLoadOracleInputs, DbError> {
        let messages = self.messages.read().map_err(|_| DbError::LockPoisoned)?;
        messages
            .get(&message_key)
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                kind: "L1-to-L2 message",
                key: message_key.to_string(),
            })
    }

    async fn get_commitment_oracle(
        &self,
        address: AztecAddress,
        commitment: Fr,
    ) -> Result<CommitmentDataOracleInputs, DbError> {
        let commitments = self
            .commitments
            .read()
            .map_err(|_| DbError::LockPoisoned)?;
        commitments
            .get(&(address, commitment))
            .cloned()
            .ok_or_else(|| DbError::NotFound {
                kind: "commitment",
                key: format!("{address}:{commitment}"),
            })
    }
}
