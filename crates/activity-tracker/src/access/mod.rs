//! Per-request authorization scoping.

pub mod policy;

pub use policy::{AccessOperation, AccessScope, AccessScopePolicy, ActivityFilter, Actor};

use crate::accounts::{UserId, UserRecord, UserRepository};
use crate::storage::RepositoryError;

/// Authorization failures. Mapped to 403 at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("unknown account {0}")]
    UnknownActor(UserId),
    #[error("account {0} is deactivated")]
    Inactive(UserId),
    #[error("operation {} is outside the caller's access scope", .operation.label())]
    OutOfScope { operation: AccessOperation },
}

/// Loads the acting account, rejecting unknown or deactivated users.
pub(crate) fn resolve_actor<U, E>(users: &U, id: &UserId) -> Result<UserRecord, E>
where
    U: UserRepository + ?Sized,
    E: From<AccessError> + From<RepositoryError>,
{
    let record = users
        .fetch(id)?
        .ok_or_else(|| AccessError::UnknownActor(id.clone()))?;
    if !record.is_active {
        return Err(AccessError::Inactive(id.clone()).into());
    }
    Ok(record)
}

pub(crate) fn ensure_allowed(
    scope: &AccessScope,
    operation: AccessOperation,
) -> Result<(), AccessError> {
    if scope.is_denied() {
        Err(AccessError::OutOfScope { operation })
    } else {
        Ok(())
    }
}
