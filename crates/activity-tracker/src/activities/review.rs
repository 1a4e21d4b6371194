use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ActivityId, ActivityRecord, ActivityStatus};
use crate::accounts::{UserId, UserRecord};
use crate::config::{ReviewConfig, DEFAULT_MAX_ACTIVITY_CREDITS};
use crate::validation::non_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl ReviewDecision {
    pub const fn status(self) -> ActivityStatus {
        match self {
            ReviewDecision::Approved => ActivityStatus::Approved,
            ReviewDecision::Rejected => ActivityStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub decision: ReviewDecision,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub credits: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewError {
    #[error("activity {id} has already been {}", .status.label())]
    AlreadyReviewed {
        id: ActivityId,
        status: ActivityStatus,
    },
    #[error("credits can only be awarded when approving an activity")]
    CreditsNotAllowed,
    #[error("credits must be between 0 and {max}, got {found}")]
    InvalidCredits { max: f64, found: f64 },
}

/// Pending → approved | rejected. Both outcomes are terminal.
#[derive(Debug, Clone)]
pub struct ReviewWorkflow {
    max_credits: f64,
}

impl Default for ReviewWorkflow {
    fn default() -> Self {
        Self::from_config(&ReviewConfig::default())
    }
}

impl ReviewWorkflow {
    pub fn from_config(config: &ReviewConfig) -> Self {
        let cap = config.max_credits_per_activity;
        let max_credits = if cap.is_finite() && cap > 0.0 {
            cap
        } else {
            DEFAULT_MAX_ACTIVITY_CREDITS
        };
        Self { max_credits }
    }

    pub fn max_credits(&self) -> f64 {
        self.max_credits
    }

    /// Returns the reviewed copy of `activity`; the input is left untouched so a failed review
    /// never leaves a partially updated record behind.
    pub fn review(
        &self,
        activity: &ActivityRecord,
        reviewer: &UserId,
        request: &ReviewRequest,
        reviewed_at: DateTime<Utc>,
    ) -> Result<ActivityRecord, ReviewError> {
        if activity.status.is_terminal() {
            return Err(ReviewError::AlreadyReviewed {
                id: activity.id.clone(),
                status: activity.status,
            });
        }

        if let Some(credits) = request.credits {
            if request.decision == ReviewDecision::Rejected {
                return Err(ReviewError::CreditsNotAllowed);
            }
            if !credits.is_finite() || credits < 0.0 || credits > self.max_credits {
                return Err(ReviewError::InvalidCredits {
                    max: self.max_credits,
                    found: credits,
                });
            }
        }

        let mut reviewed = activity.clone();
        reviewed.status = request.decision.status();
        reviewed.approved_by = Some(reviewer.clone());
        reviewed.remarks = non_blank(request.remarks.as_deref()).map(str::to_string);
        reviewed.reviewed_at = Some(reviewed_at);
        if let (ReviewDecision::Approved, Some(credits)) = (request.decision, request.credits) {
            reviewed.credits = credits;
        }
        Ok(reviewed)
    }
}

/// Mutations required before an account can be deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRemovalPlan {
    pub user_id: UserId,
    /// Activities owned by the user; deleted outright.
    pub removed: Vec<ActivityId>,
    /// Activities the user reviewed for other students, with the approver cleared.
    pub detached: Vec<ActivityRecord>,
}

pub fn attribution_note(reviewer: &UserRecord) -> String {
    format!(
        "[Reviewed by {} {} ({}); account since removed]",
        reviewer.role.label(),
        reviewer.name,
        reviewer.email
    )
}

/// Clears the approver reference and records who reviewed the activity in its remarks.
pub fn detach_approver(activity: &ActivityRecord, note: &str) -> ActivityRecord {
    let mut detached = activity.clone();
    detached.approved_by = None;
    detached.remarks = Some(match non_blank(activity.remarks.as_deref()) {
        Some(existing) => format!("{existing} {note}"),
        None => note.to_string(),
    });
    detached
}

/// `owned` are the user's own activities, `reviewed` those where the user is the approver.
/// An activity the user both owns and approved is simply removed.
pub fn plan_user_removal(
    user: &UserRecord,
    owned: &[ActivityRecord],
    reviewed: &[ActivityRecord],
) -> UserRemovalPlan {
    let note = attribution_note(user);
    UserRemovalPlan {
        user_id: user.id.clone(),
        removed: owned.iter().map(|record| record.id.clone()).collect(),
        detached: reviewed
            .iter()
            .filter(|record| record.student_id != user.id)
            .map(|record| detach_approver(record, &note))
            .collect(),
    }
}
