//! Error types raised by collaborator stores.

use thiserror::Error;

/// Errors surfaced by contract, state, and commitment stores.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("store lock was poisoned")]
    LockPoisoned,

    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    #[error("store backend error: {0}")]
    Backend(String),
}
