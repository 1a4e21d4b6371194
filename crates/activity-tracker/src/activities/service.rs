use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{
    ActivityId, ActivityListQuery, ActivityRecord, ActivityStatus, ActivitySubmission,
};
use super::repository::{ActivityQuery, ActivityRepository};
use super::review::{ReviewError, ReviewRequest, ReviewWorkflow};
use crate::access::{
    ensure_allowed, resolve_actor, AccessError, AccessOperation, AccessScope, AccessScopePolicy,
    Actor,
};
use crate::accounts::{UserId, UserRepository};
use crate::config::ReviewConfig;
use crate::storage::RepositoryError;
use crate::validation::{require, ValidationError};

/// Service composing the access policy, review workflow, and repositories.
pub struct ActivityService<A, U> {
    activities: Arc<A>,
    users: Arc<U>,
    workflow: ReviewWorkflow,
}

static ACTIVITY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_activity_id() -> ActivityId {
    let id = ACTIVITY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ActivityId(format!("act-{id:06}"))
}

impl<A, U> ActivityService<A, U>
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    pub fn new(activities: Arc<A>, users: Arc<U>, config: ReviewConfig) -> Self {
        Self {
            activities,
            users,
            workflow: ReviewWorkflow::from_config(&config),
        }
    }

    /// Record a new pending activity for the acting student.
    pub fn submit(
        &self,
        actor_id: &UserId,
        submission: ActivitySubmission,
    ) -> Result<ActivityRecord, ActivityServiceError> {
        let actor = self.actor(actor_id)?;
        let scope = AccessScopePolicy::scope_for(&actor, AccessOperation::SubmitActivity);
        ensure_allowed(&scope, AccessOperation::SubmitActivity)?;

        let title = require(Some(submission.title.as_str()), "title")?;
        if submission.date > Utc::now().date_naive() {
            return Err(ValidationError::InvalidField {
                field: "date",
                reason: "activity date cannot be in the future".to_string(),
            }
            .into());
        }
        submission.proof_document.validate()?;

        let record = ActivityRecord {
            id: next_activity_id(),
            student_id: actor.id.clone(),
            title,
            activity_type: submission.activity_type,
            description: submission.description.trim().to_string(),
            date: submission.date,
            duration: submission.duration.trim().to_string(),
            organizer: submission.organizer.trim().to_string(),
            proof_document: submission.proof_document,
            status: ActivityStatus::Pending,
            credits: 0.0,
            approved_by: None,
            remarks: None,
            submitted_at: Utc::now(),
            reviewed_at: None,
        };

        let stored = self.activities.insert(record)?;
        info!(
            activity = %stored.id,
            student = %stored.student_id,
            activity_type = stored.activity_type.label(),
            "activity submitted"
        );
        Ok(stored)
    }

    /// Activities visible to the actor, newest first.
    pub fn list(
        &self,
        actor_id: &UserId,
        query: &ActivityListQuery,
    ) -> Result<Vec<ActivityRecord>, ActivityServiceError> {
        let actor = self.actor(actor_id)?;
        let scope = AccessScopePolicy::scope_for(&actor, AccessOperation::ViewActivities);
        ensure_allowed(&scope, AccessOperation::ViewActivities)?;

        let owners = match &scope {
            AccessScope::Category(_) => scope.activity_filter(&self.users.students()?),
            _ => scope.activity_filter(std::iter::empty()),
        };
        if owners.is_unsatisfiable() {
            debug!(actor = %actor.id, "access scope matches no students");
        }

        let query = ActivityQuery {
            owners,
            student: query
                .student
                .as_deref()
                .map(str::trim)
                .filter(|student| !student.is_empty())
                .map(|student| UserId(student.to_string())),
            status: query.status,
            approved_by: None,
        };
        Ok(self.activities.list(&query)?)
    }

    pub fn get(
        &self,
        actor_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<ActivityRecord, ActivityServiceError> {
        let actor = self.actor(actor_id)?;
        let activity = self.fetch(activity_id)?;
        self.ensure_scope_covers(&actor, AccessOperation::ViewActivities, &activity)?;
        Ok(activity)
    }

    /// Approve or reject a pending activity. Scope is checked before the state transition.
    pub fn review(
        &self,
        actor_id: &UserId,
        activity_id: &ActivityId,
        request: &ReviewRequest,
    ) -> Result<ActivityRecord, ActivityServiceError> {
        let actor = self.actor(actor_id)?;
        let activity = self.fetch(activity_id)?;
        self.ensure_scope_covers(&actor, AccessOperation::ApproveActivity, &activity)?;

        let reviewed = self
            .workflow
            .review(&activity, &actor.id, request, Utc::now())?;
        self.activities
            .update_pending(reviewed.clone())
            .map_err(|err| self.settled_elsewhere(&reviewed.id, err))?;

        info!(
            activity = %reviewed.id,
            reviewer = %actor.id,
            status = reviewed.status.label(),
            credits = reviewed.credits,
            "activity reviewed"
        );
        Ok(reviewed)
    }

    /// Owners may withdraw an activity while it is still pending.
    pub fn withdraw(
        &self,
        actor_id: &UserId,
        activity_id: &ActivityId,
    ) -> Result<(), ActivityServiceError> {
        let actor = self.actor(actor_id)?;
        let activity = self.fetch(activity_id)?;
        if activity.student_id != actor.id {
            return Err(AccessError::OutOfScope {
                operation: AccessOperation::SubmitActivity,
            }
            .into());
        }
        if activity.status.is_terminal() {
            return Err(ReviewError::AlreadyReviewed {
                id: activity.id,
                status: activity.status,
            }
            .into());
        }

        self.activities
            .remove_pending(&activity.id)
            .map_err(|err| self.settled_elsewhere(&activity.id, err))?;
        info!(activity = %activity.id, student = %actor.id, "pending activity withdrawn");
        Ok(())
    }

    fn actor(&self, actor_id: &UserId) -> Result<Actor, ActivityServiceError> {
        let record = resolve_actor::<_, ActivityServiceError>(self.users.as_ref(), actor_id)?;
        Ok(Actor::from(&record))
    }

    fn fetch(&self, activity_id: &ActivityId) -> Result<ActivityRecord, ActivityServiceError> {
        Ok(self
            .activities
            .fetch(activity_id)?
            .ok_or(RepositoryError::NotFound)?)
    }

    /// A conditional write lost to a concurrent review: report the status that won.
    fn settled_elsewhere(&self, id: &ActivityId, err: RepositoryError) -> ActivityServiceError {
        if !matches!(err, RepositoryError::Conflict) {
            return err.into();
        }
        match self.activities.fetch(id) {
            Ok(Some(current)) => ReviewError::AlreadyReviewed {
                id: current.id,
                status: current.status,
            }
            .into(),
            Ok(None) => RepositoryError::NotFound.into(),
            Err(err) => err.into(),
        }
    }

    fn ensure_scope_covers(
        &self,
        actor: &Actor,
        operation: AccessOperation,
        activity: &ActivityRecord,
    ) -> Result<(), ActivityServiceError> {
        let scope = AccessScopePolicy::scope_for(actor, operation);
        ensure_allowed(&scope, operation)?;
        if scope == AccessScope::Unrestricted {
            return Ok(());
        }

        let owner = self
            .users
            .fetch(&activity.student_id)?
            .ok_or(RepositoryError::NotFound)?;
        if scope.permits_student(&owner) {
            Ok(())
        } else {
            Err(AccessError::OutOfScope { operation }.into())
        }
    }
}

/// Error raised by the activity service.
#[derive(Debug, thiserror::Error)]
pub enum ActivityServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
