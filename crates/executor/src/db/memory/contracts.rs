//! In-memory contracts directory.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use simulator_core::{AztecAddress, EthAddress, FunctionSelector};

use crate::db::{DbError, PublicContractsDb};

/// In-memory registry of public function bytecode and portal addresses.
pub struct InMemoryContractsDb {
    bytecode: RwLock<HashMap<(AztecAddress, FunctionSelector), Vec<u8>>>,
    portals: RwLock<HashMap<AztecAddress, EthAddress>>,
}

impl InMemoryContractsDb {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            bytecode: RwLock::new(HashMap::new()),
            portals: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) the bytecode of a public function.
    pub fn register_function(
        &self,
        address: AztecAddress,
        selector: FunctionSelector,
        bytecode: Vec<u8>,
    ) -> Result<(), DbError> {
        let mut functions = self.bytecode.write().map_err(|_| DbError::LockPoisoned)?;
        functions.insert((address, selector), bytecode);
        Ok(())
    }

    /// Pair a contract with its L1 portal.
    pub fn register_portal(
        &self,
        address: AztecAddress,
        portal: EthAddress,
    ) -> Result<(), DbError> {
        let mut portals = self.portals.write().map_err(|_| DbError::LockPoisoned)?;
        portals.insert(address, portal);
        Ok(())
    }
}

impl Default for InMemoryContractsDb {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublicContractsDb for InMemoryContractsDb {
    async fn get_bytecode(
        &self,
        address: AztecAddress,
        selector: FunctionSelector,
    ) -> Result<Option<Vec<u8>>, DbError> {
        let functions = self.bytecode.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(functions.get(&(address, selector)).cloned())
    }

    async fn get_portal_contract_address(
        &self,
        address: AztecAddress,
    ) -> Result<Option<EthAddress>, DbError> {
        let portals = self.portals.read().map_err(|_| DbError::LockPoisoned)?;
        Ok(portals.get(&address).copied())
    }
}
