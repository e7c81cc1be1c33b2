//! Membership data returned by the commitments store, in oracle-load layout.
use crate::field::Fr;

/// Inclusion data for an L1-to-L2 message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLoadOracleInputs {
    /// The message preimage, already flattened to fields.
    pub message: Vec<Fr>,
    pub sibling_path: Vec<Fr>,
    pub index: u64,
}

impl MessageLoadOracleInputs {
    /// Layout read by the bytecode: `message…, index, sibling_path…, root`.
    pub fn to_oracle_fields(&self, root: Fr) -> Vec<Fr> {
        let mut fields = Vec::with_capacity(self.message.len() + self.sibling_path.len() + 2);
        fields.extend_from_slice(&self.message);
        fields.push(Fr::from(self.index));
        fields.extend_from_slice(&self.sibling_path);
        fields.push(root);
        fields
    }
}

/// Inclusion data for a commitment in the private data tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommitmentDataOracleInputs {
    pub commitment: Fr,
    pub sibling_path: Vec<Fr>,
    pub index: u64,
}

impl CommitmentDataOracleInputs {
    /// Layout read by the bytecode: `commitment, index, sibling_path…, root`.
    pub fn to_oracle_fields(&self, root: Fr) -> Vec<Fr> {
        let mut fields = Vec::with_capacity(self.sibling_path.len() + 3);
        fields.push(self.commitment);
        fields.push(Fr::from(self.index));
        fields.extend_from_slice(&self.sibling_path);
        fields.push(root);
        fields
    }
}
