use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::accounts::UserId;

/// Identifier wrapper for submitted activities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActivityId(pub String);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Conference,
    Workshop,
    Seminar,
    Competition,
    Internship,
    Certification,
    Hackathon,
    Volunteering,
    Sports,
    Cultural,
    Research,
    Other,
}

impl ActivityType {
    pub const fn label(self) -> &'static str {
        match self {
            ActivityType::Conference => "Conference",
            ActivityType::Workshop => "Workshop",
            ActivityType::Seminar => "Seminar",
            ActivityType::Competition => "Competition",
            ActivityType::Internship => "Internship",
            ActivityType::Certification => "Certification",
            ActivityType::Hackathon => "Hackathon",
            ActivityType::Volunteering => "Volunteering",
            ActivityType::Sports => "Sports",
            ActivityType::Cultural => "Cultural",
            ActivityType::Research => "Research",
            ActivityType::Other => "Other",
        }
    }
}

/// Review state. `Pending` is the only state that accepts a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Pending,
    Approved,
    Rejected,
}

impl ActivityStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Pending, Self::Approved, Self::Rejected]
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::Approved => "approved",
            ActivityStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ActivityStatus::Pending)
    }
}

/// Reference to an uploaded proof; the blob itself lives in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofDocument {
    pub file_name: String,
    pub storage_key: String,
}

/// Student-provided payload for a new activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySubmission {
    pub title: String,
    pub activity_type: ActivityType,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub organizer: String,
    pub proof_document: ProofDocument,
}

/// Persisted activity. Field names are part of the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: ActivityId,
    pub student_id: UserId,
    pub title: String,
    pub activity_type: ActivityType,
    pub description: String,
    pub date: NaiveDate,
    pub duration: String,
    pub organizer: String,
    pub proof_document: ProofDocument,
    pub status: ActivityStatus,
    pub credits: f64,
    pub approved_by: Option<UserId>,
    pub remarks: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl ActivityRecord {
    pub fn is_pending(&self) -> bool {
        self.status == ActivityStatus::Pending
    }
}

/// Caller-facing listing filters, narrowed further by the actor's access scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityListQuery {
    #[serde(default)]
    pub status: Option<ActivityStatus>,
    #[serde(default)]
    pub student: Option<String>,
}
