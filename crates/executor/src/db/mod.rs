//! Store layer for data the executor reads from or writes to.
//!
//! - Contracts directory (bytecode and portals)
//! - Public world state (storage slots)
//! - Commitments store (tree roots and membership witnesses)
//!
//! In-memory implementations back tests and local runs.

mod error;
mod memory;
mod traits;

pub use error::DbError;
pub use memory::{InMemoryCommitmentsDb, InMemoryContractsDb, InMemoryPublicStateDb};
pub use traits::{CommitmentsDb, PublicContractsDb, PublicStateDb};
