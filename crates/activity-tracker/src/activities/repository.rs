use super::domain::{ActivityId, ActivityRecord, ActivityStatus};
use super::review::UserRemovalPlan;
use crate::access::ActivityFilter;
use crate::accounts::{UserId, UserRecord};
use crate::storage::RepositoryError;

/// Query handed to the repository: the access filter plus caller-supplied narrowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityQuery {
    pub owners: ActivityFilter,
    pub student: Option<UserId>,
    pub status: Option<ActivityStatus>,
    pub approved_by: Option<UserId>,
}

impl ActivityQuery {
    pub fn all() -> Self {
        Self {
            owners: ActivityFilter::All,
            student: None,
            status: None,
            approved_by: None,
        }
    }

    pub fn owned_by(student: &UserId) -> Self {
        Self {
            student: Some(student.clone()),
            ..Self::all()
        }
    }

    pub fn approved_by(reviewer: &UserId) -> Self {
        Self {
            approved_by: Some(reviewer.clone()),
            ..Self::all()
        }
    }

    pub fn matches(&self, record: &ActivityRecord) -> bool {
        self.owners.permits(&record.student_id)
            && self
                .student
                .as_ref()
                .map_or(true, |student| record.student_id == *student)
            && self.status.map_or(true, |status| record.status == status)
            && self
                .approved_by
                .as_ref()
                .map_or(true, |reviewer| record.approved_by.as_ref() == Some(reviewer))
    }
}

/// Storage abstraction for activities.
pub trait ActivityRepository: Send + Sync {
    fn insert(&self, record: ActivityRecord) -> Result<ActivityRecord, RepositoryError>;
    /// Replaces the stored record only while it is still pending. A record that has left
    /// `Pending` fails with `Conflict`; a missing one with `NotFound`.
    fn update_pending(&self, record: ActivityRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ActivityId) -> Result<Option<ActivityRecord>, RepositoryError>;
    /// Newest submissions first.
    fn list(&self, query: &ActivityQuery) -> Result<Vec<ActivityRecord>, RepositoryError>;
    /// Same status guard as `update_pending`.
    fn remove_pending(&self, id: &ActivityId) -> Result<(), RepositoryError>;
    /// Plans the cascade for `user` from the records stored at the time of the call and
    /// applies it as one unit: owned activities are deleted and activities the user approved
    /// for others are detached. Returns the plan that was applied.
    fn apply_user_removal(&self, user: &UserRecord) -> Result<UserRemovalPlan, RepositoryError>;
}
