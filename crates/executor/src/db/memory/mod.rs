//! In-memory store implementations.

mod commitments;
mod contracts;
mod state;

pub use commitments::InMemoryCommitmentsDb;
pub use contracts::InMemoryContractsDb;
pub use state::InMemoryPublicStateDb;
