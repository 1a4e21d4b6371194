use super::domain::{UserId, UserRecord};
use crate::storage::RepositoryError;

/// Storage abstraction for accounts so services can be exercised in isolation.
pub trait UserRepository: Send + Sync {
    /// Fails with `Conflict` when the id or (case-insensitive) email is already taken.
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
    fn update(&self, record: UserRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError>;
    fn students(&self) -> Result<Vec<UserRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<UserRecord>, RepositoryError>;
    fn remove(&self, id: &UserId) -> Result<UserRecord, RepositoryError>;
}
