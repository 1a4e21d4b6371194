//! Repository error type and the in-memory adapters used by the demo server and tests.

pub mod memory;

pub use memory::{InMemoryActivityRepository, InMemoryUserRepository};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
