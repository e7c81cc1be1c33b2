//! Output of a public function execution.
//!
//! A [`PublicExecutionResult`] is an owned tree: each frame keeps only its own
//! effects and holds one child result per nested public call, in call order.
use crate::call::PublicExecution;
use crate::error::LogsError;
use crate::field::Fr;
use crate::storage::{ContractStorageRead, ContractStorageUpdateRequest};

/// Unencrypted logs emitted by a single function invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionL2Logs {
    pub logs: Vec<Vec<u8>>,
}

impl FunctionL2Logs {
    pub fn new(logs: Vec<Vec<u8>>) -> Self {
        Self { logs }
    }

    pub fn push(&mut self, log: Vec<u8>) {
        self.logs.push(log);
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Serializes as `[u32 total length][u32 len][bytes]…`, big-endian.
    ///
    /// The total length counts every byte that follows it, so the whole
    /// body must fit in a `u32`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LogsError> {
        let body_len = self
            .logs
            .iter()
            .try_fold(0usize, |total, log| total.checked_add(4)?.checked_add(log.len()))
            .ok_or(LogsError::TooLong { len: usize::MAX })?;
        let mut out = Vec::with_capacity(4 + body_len);
        out.extend_from_slice(&length_prefix(body_len)?);
        for log in &self.logs {
            out.extend_from_slice(&length_prefix(log.len())?);
            out.extend_from_slice(log);
        }
        Ok(out)
    }
}

fn length_prefix(len: usize) -> Result<[u8; 4], LogsError> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| LogsError::TooLong { len })
}

/// Everything one call frame did, plus the results of its nested calls.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicExecutionResult {
    pub execution: PublicExecution,
    pub new_commitments: Vec<Fr>,
    pub new_l2_to_l1_messages: Vec<Fr>,
    pub new_nullifiers: Vec<Fr>,
    pub contract_storage_reads: Vec<ContractStorageRead>,
    pub contract_storage_update_requests: Vec<ContractStorageUpdateRequest>,
    pub return_values: Vec<Fr>,
    pub nested_executions: Vec<PublicExecutionResult>,
    pub unencrypted_logs: FunctionL2Logs,
}

impl PublicExecutionResult {
    /// Visits this frame and every descendant in pre-order (call order).
    pub fn iter_frames(&self) -> FrameIter<'_> {
        FrameIter { stack: vec![self] }
    }

    /// Number of frames in the tree, including this one.
    pub fn call_count(&self) -> usize {
        self.iter_frames().count()
    }

    /// Per-frame unencrypted logs in the order the calls started.
    pub fn all_unencrypted_logs(&self) -> Vec<&FunctionL2Logs> {
        self.iter_frames()
            .map(|frame| &frame.unencrypted_logs)
            .collect()
    }
}

/// Pre-order iterator over a result tree.
pub struct FrameIter<'a> {
    stack: Vec<&'a PublicExecutionResult>,
}

impl<'a> Iterator for FrameIter<'a> {
    type Item = &'a PublicExecutionResult;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        self.stack.extend(frame.nested_executions.iter().rev());
        Some(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AztecAddress;
    use crate::call::{CallContext, FunctionData};

    fn frame(address: u64, nested: Vec<PublicExecutionResult>) -> PublicExecutionResult {
        PublicExecutionResult {
            execution: PublicExecution {
                contract_address: AztecAddress::from(address),
                function_data: FunctionData::default(),
                args: vec![],
                call_context: CallContext::default(),
            },
            new_commitments: vec![],
            new_l2_to_l1_messages: vec![],
            new_nullifiers: vec![],
            contract_storage_reads: vec![],
            contract_storage_update_requests: vec![],
            return_values: vec![],
            nested_executions: nested,
            unencrypted_logs: FunctionL2Logs::new(vec![address.to_be_bytes().to_vec()]),
        }
    }

    #[test]
    fn frames_are_visited_in_call_order() {
        let tree = frame(
            1,
            vec![frame(2, vec![frame(3, vec![])]), frame(4, vec![])],
        );
        let order: Vec<_> = tree
            .iter_frames()
            .map(|f| f.execution.contract_address)
            .collect();
        assert_eq!(
            order,
            [1, 2, 3, 4].map(AztecAddress::from).to_vec()
        );
        assert_eq!(tree.call_count(), 4);
        assert_eq!(tree.all_unencrypted_logs().len(), 4);
    }

    #[test]
    fn logs_serialize_with_length_prefixes() {
        let logs = FunctionL2Logs::new(vec![b"ab".to_vec(), vec![]]);
        assert_eq!(
            logs.to_bytes(),
            Ok(vec![0, 0, 0, 10, 0, 0, 0, 2, b'a', b'b', 0, 0, 0, 0])
        );
        assert_eq!(FunctionL2Logs::default().to_bytes(), Ok(vec![0, 0, 0, 0]));
    }

    #[test]
    fn length_prefix_rejects_lengths_past_u32() {
        assert_eq!(length_prefix(u32::MAX as usize), Ok([0xff; 4]));

        #[cfg(target_pointer_width = "64")]
        {
            let len = u32::MAX as usize + 1;
            assert_eq!(length_prefix(len), Err(LogsError::TooLong { len }));
        }
    }
}
