use std::sync::Arc;

use axum::response::Response;
use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::accounts::{UserId, UserRecord, UserRepository, UserRole};
use crate::activities::domain::{ActivityId, ActivityRecord, ActivitySubmission, ActivityType};
use crate::activities::repository::{ActivityQuery, ActivityRepository};
use crate::activities::review::{ReviewDecision, ReviewRequest, UserRemovalPlan};
use crate::activities::{ActivityService, ProofDocument};
use crate::config::ReviewConfig;
use crate::programs::ProgramCategory;
use crate::storage::{InMemoryActivityRepository, InMemoryUserRepository, RepositoryError};

pub(super) const ADMIN: &str = "usr-admin";
pub(super) const SCIENCE_FACULTY: &str = "usr-fac-sci";
pub(super) const LAW_FACULTY: &str = "usr-fac-law";
pub(super) const LEGACY_FACULTY: &str = "usr-fac-legacy";
pub(super) const ENGINEERING_STUDENT: &str = "usr-stu-eng";
pub(super) const SCIENCE_STUDENT: &str = "usr-stu-sci";

pub(super) type MemoryService = ActivityService<InMemoryActivityRepository, InMemoryUserRepository>;

pub(super) fn uid(id: &str) -> UserId {
    UserId(id.to_string())
}

pub(super) fn account(
    id: &str,
    role: UserRole,
    category: Option<ProgramCategory>,
) -> UserRecord {
    UserRecord {
        id: uid(id),
        name: id.trim_start_matches("usr-").to_string(),
        email: format!("{id}@campus.test"),
        role,
        program_category: category,
        program: None,
        specialization: None,
        admission_year: None,
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Admin, faculty in Science and Law, a faculty account with no category, and one student
/// each in Engineering and Science.
pub(super) fn seeded_users() -> Arc<InMemoryUserRepository> {
    let users = Arc::new(InMemoryUserRepository::default());
    for record in [
        account(ADMIN, UserRole::Admin, None),
        account(
            SCIENCE_FACULTY,
            UserRole::Faculty,
            Some(ProgramCategory::Science),
        ),
        account(LAW_FACULTY, UserRole::Faculty, Some(ProgramCategory::Law)),
        account(LEGACY_FACULTY, UserRole::Faculty, None),
        account(
            ENGINEERING_STUDENT,
            UserRole::Student,
            Some(ProgramCategory::Engineering),
        ),
        account(
            SCIENCE_STUDENT,
            UserRole::Student,
            Some(ProgramCategory::Science),
        ),
    ] {
        users.insert(record).expect("seed account");
    }
    users
}

pub(super) fn build_service() -> (
    MemoryService,
    Arc<InMemoryActivityRepository>,
    Arc<InMemoryUserRepository>,
) {
    let activities = Arc::new(InMemoryActivityRepository::default());
    let users = seeded_users();
    let service = ActivityService::new(activities.clone(), users.clone(), ReviewConfig::default());
    (service, activities, users)
}

pub(super) fn submission(title: &str) -> ActivitySubmission {
    ActivitySubmission {
        title: title.to_string(),
        activity_type: ActivityType::Workshop,
        description: "Hands-on session".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date"),
        duration: "6 hours".to_string(),
        organizer: "Innovation Cell".to_string(),
        proof_document: ProofDocument {
            file_name: "certificate.pdf".to_string(),
            storage_key: "proofs/certificate.pdf".to_string(),
        },
    }
}

pub(super) fn approve(credits: Option<f64>) -> ReviewRequest {
    ReviewRequest {
        decision: ReviewDecision::Approved,
        remarks: Some("Verified".to_string()),
        credits,
    }
}

pub(super) fn reject() -> ReviewRequest {
    ReviewRequest {
        decision: ReviewDecision::Rejected,
        remarks: Some("Certificate unreadable".to_string()),
        credits: None,
    }
}

pub(super) struct UnavailableRepository;

impl ActivityRepository for UnavailableRepository {
    fn insert(&self, _record: ActivityRecord) -> Result<ActivityRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_pending(&self, _record: ActivityRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ActivityId) -> Result<Option<ActivityRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self, _query: &ActivityQuery) -> Result<Vec<ActivityRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn remove_pending(&self, _id: &ActivityId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn apply_user_removal(&self, _user: &UserRecord) -> Result<UserRemovalPlan, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
