//! Executor configuration structures and loaders.
use std::env;

use simulator_core::ProtocolConstants;

/// Configuration injected into a [`crate::PublicExecutor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutorConfig {
    pub constants: ProtocolConstants,
    /// Deepest nested call allowed; the top-level frame is depth 0.
    pub max_call_depth: usize,
}

impl ExecutorConfig {
    pub const DEFAULT_MAX_CALL_DEPTH: usize = 32;

    pub const fn new(constants: ProtocolConstants) -> Self {
        Self {
            constants,
            max_call_depth: Self::DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// - `PUBLIC_MAX_RETURN_VALUES`
    /// - `PUBLIC_WITNESS_START_INDEX`
    /// - `PUBLIC_STATE_READS_LENGTH` / `PUBLIC_STATE_TRANSITIONS_LENGTH`
    /// - `PUBLIC_MAX_CALL_DEPTH`
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with an arbitrary variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let constants = &mut config.constants;

        if let Some(width) = read_var::<usize>(&lookup, "PUBLIC_MAX_RETURN_VALUES") {
            constants.max_return_values = width.max(1);
        }

        if let Some(start) = read_var::<u32>(&lookup, "PUBLIC_WITNESS_START_INDEX") {
            constants.witness_start_index = start;
        }

        if let Some(length) = read_var::<usize>(&lookup, "PUBLIC_STATE_READS_LENGTH") {
            constants.state_reads_length = length.max(1);
        }

        if let Some(length) = read_var::<usize>(&lookup, "PUBLIC_STATE_TRANSITIONS_LENGTH") {
            constants.state_transitions_length = length.max(1);
        }

        if let Some(depth) = read_var::<usize>(&lookup, "PUBLIC_MAX_CALL_DEPTH") {
            config.max_call_depth = depth;
        }

        config
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::new(ProtocolConstants::default())
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
