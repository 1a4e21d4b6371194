use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{
    ProfileUpdate, Registration, StudentQuery, UserId, UserRecord, UserRemovalSummary, UserRole,
};
use super::registration::ProfileGuard;
use super::repository::UserRepository;
use crate::access::{
    ensure_allowed, resolve_actor, AccessError, AccessOperation, AccessScopePolicy, Actor,
};
use crate::activities::repository::ActivityRepository;
use crate::config::BootstrapAdmin;
use crate::programs::ProgramCategory;
use crate::storage::RepositoryError;
use crate::validation::{non_blank, ValidationError};

/// Account lifecycle: registration, admin management, and cascading deletion.
pub struct AccountService<U, A> {
    users: Arc<U>,
    activities: Arc<A>,
    guard: ProfileGuard,
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("usr-{id:06}"))
}

impl<U, A> AccountService<U, A>
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    pub fn new(users: Arc<U>, activities: Arc<A>, guard: ProfileGuard) -> Self {
        Self {
            users,
            activities,
            guard,
        }
    }

    /// Self-service sign-up, limited to student and faculty accounts.
    pub fn register(&self, registration: Registration) -> Result<UserRecord, AccountServiceError> {
        if registration.role == UserRole::Admin {
            return Err(ValidationError::InvalidField {
                field: "role",
                reason: "self-registration is limited to students and faculty".to_string(),
            }
            .into());
        }
        self.persist(registration)
    }

    /// Ensures the configured administrator exists. An account already holding the email is
    /// returned unchanged, whatever its role.
    pub fn bootstrap_admin(
        &self,
        admin: &BootstrapAdmin,
    ) -> Result<UserRecord, AccountServiceError> {
        let email = admin.email.trim().to_ascii_lowercase();
        if let Some(existing) = self
            .users
            .all()?
            .into_iter()
            .find(|user| user.email == email)
        {
            return Ok(existing);
        }

        self.persist(Registration {
            name: admin.name.clone(),
            email,
            role: UserRole::Admin,
            program_category: None,
            program: None,
            specialization: None,
            admission_year: None,
        })
    }

    /// Admin-driven creation of any role.
    pub fn create(
        &self,
        actor_id: &UserId,
        registration: Registration,
    ) -> Result<UserRecord, AccountServiceError> {
        self.require_admin(actor_id, AccessOperation::ManageUsers)?;
        self.persist(registration)
    }

    /// Self, admins, and anyone allowed to browse students may read an account.
    pub fn get(
        &self,
        actor_id: &UserId,
        user_id: &UserId,
    ) -> Result<UserRecord, AccountServiceError> {
        let actor = self.actor(actor_id)?;
        let user = self.fetch(user_id)?;
        if actor.id == user.id || actor.role == UserRole::Admin {
            return Ok(user);
        }
        let scope = AccessScopePolicy::scope_for(&actor, AccessOperation::ViewStudents);
        if scope.permits_student(&user) {
            Ok(user)
        } else {
            Err(AccessError::OutOfScope {
                operation: AccessOperation::ViewStudents,
            }
            .into())
        }
    }

    /// Student directory. Faculty browse every category; approval rights are checked elsewhere.
    pub fn list_students(
        &self,
        actor_id: &UserId,
        query: &StudentQuery,
    ) -> Result<Vec<UserRecord>, AccountServiceError> {
        let actor = self.actor(actor_id)?;
        let scope = AccessScopePolicy::scope_for(&actor, AccessOperation::ViewStudents);
        ensure_allowed(&scope, AccessOperation::ViewStudents)?;

        // Unknown category filters match nobody, mirroring the catalog's permissive lookups.
        let category = match non_blank(query.category.as_deref()) {
            Some(raw) => match ProgramCategory::resolve(raw) {
                Some(category) => Some(category),
                None => return Ok(Vec::new()),
            },
            None => None,
        };
        let needle = non_blank(query.search.as_deref()).map(str::to_lowercase);

        Ok(self
            .users
            .students()?
            .into_iter()
            .filter(|student| scope.permits_student(student))
            .filter(|student| category.map_or(true, |c| student.program_category == Some(c)))
            .filter(|student| {
                needle.as_deref().map_or(true, |needle| {
                    student.name.to_lowercase().contains(needle)
                        || student.email.to_lowercase().contains(needle)
                })
            })
            .collect())
    }

    /// Profile edits by the account holder or an admin. Role never changes here.
    pub fn update_profile(
        &self,
        actor_id: &UserId,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AccountServiceError> {
        let actor = self.actor(actor_id)?;
        if actor.id != *user_id && actor.role != UserRole::Admin {
            return Err(AccessError::OutOfScope {
                operation: AccessOperation::ManageUsers,
            }
            .into());
        }

        let existing = self.fetch(user_id)?;
        let updated = self.guard.apply_update(&existing, update)?;
        self.users.update(updated.clone())?;
        info!(user = %updated.id, editor = %actor.id, "profile updated");
        Ok(updated)
    }

    pub fn set_active(
        &self,
        actor_id: &UserId,
        user_id: &UserId,
        active: bool,
    ) -> Result<UserRecord, AccountServiceError> {
        let admin = self.require_admin(actor_id, AccessOperation::ManageUsers)?;
        if admin.id == *user_id && !active {
            return Err(ValidationError::InvalidField {
                field: "isActive",
                reason: "administrators cannot deactivate their own account".to_string(),
            }
            .into());
        }

        let mut user = self.fetch(user_id)?;
        user.is_active = active;
        self.users.update(user.clone())?;
        info!(user = %user.id, active, admin = %admin.id, "account status changed");
        Ok(user)
    }

    /// Deletes an account. Owned activities go with it; activities the user reviewed for
    /// others stay, with the approver cleared and an attribution note in the remarks.
    ///
    /// The account is deactivated before the cascade so it cannot submit or review while its
    /// activities are being rewritten. If the user record cannot be removed afterwards, the
    /// account stays deactivated with its activities already cleaned up, and repeating the
    /// delete finishes the job.
    pub fn delete(
        &self,
        actor_id: &UserId,
        user_id: &UserId,
    ) -> Result<UserRemovalSummary, AccountServiceError> {
        let admin = self.require_admin(actor_id, AccessOperation::ManageUsers)?;
        if admin.id == *user_id {
            return Err(ValidationError::InvalidField {
                field: "id",
                reason: "administrators cannot delete their own account".to_string(),
            }
            .into());
        }

        let user = self.fetch(user_id)?;
        if user.is_active {
            self.users.update(UserRecord {
                is_active: false,
                ..user.clone()
            })?;
        }

        let plan = match self.activities.apply_user_removal(&user) {
            Ok(plan) => plan,
            Err(err) => {
                if user.is_active {
                    if let Err(restore) = self.users.update(user.clone()) {
                        warn!(user = %user.id, error = %restore, "failed to reactivate account");
                    }
                }
                return Err(err.into());
            }
        };
        if let Err(err) = self.users.remove(&user.id) {
            warn!(
                user = %user.id,
                error = %err,
                "activities cascaded but account removal failed; account left deactivated"
            );
            return Err(err.into());
        }

        let summary = UserRemovalSummary {
            removed_activities: plan.removed.len(),
            detached_activities: plan.detached.len(),
        };
        info!(
            user = %user.id,
            admin = %admin.id,
            removed = summary.removed_activities,
            detached = summary.detached_activities,
            "account deleted"
        );
        Ok(summary)
    }

    fn persist(&self, registration: Registration) -> Result<UserRecord, AccountServiceError> {
        let mut record = self.guard.profile_from_registration(registration)?;
        record.id = next_user_id();
        let stored = self.users.insert(record)?;
        info!(user = %stored.id, role = stored.role.label(), "account created");
        Ok(stored)
    }

    fn actor(&self, actor_id: &UserId) -> Result<Actor, AccountServiceError> {
        let record = resolve_actor::<_, AccountServiceError>(self.users.as_ref(), actor_id)?;
        Ok(Actor::from(&record))
    }

    fn require_admin(
        &self,
        actor_id: &UserId,
        operation: AccessOperation,
    ) -> Result<Actor, AccountServiceError> {
        let actor = self.actor(actor_id)?;
        let scope = AccessScopePolicy::scope_for(&actor, operation);
        ensure_allowed(&scope, operation)?;
        Ok(actor)
    }

    fn fetch(&self, user_id: &UserId) -> Result<UserRecord, AccountServiceError> {
        Ok(self
            .users
            .fetch(user_id)?
            .ok_or(RepositoryError::NotFound)?)
    }
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
