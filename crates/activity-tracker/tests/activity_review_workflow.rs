//! Integration scenarios for registration, submission, scoped review, and reporting.
//!
//! Everything goes through the public services and routers over the in-memory adapters.

mod common {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};

    use activity_tracker::accounts::{
        AccountService, ProfileGuard, Registration, UserId, UserRecord, UserRepository, UserRole,
    };
    use activity_tracker::activities::{
        ActivityService, ActivitySubmission, ActivityType, ProofDocument,
    };
    use activity_tracker::config::ReviewConfig;
    use activity_tracker::reports::ReportService;
    use activity_tracker::storage::{InMemoryActivityRepository, InMemoryUserRepository};

    type Users = InMemoryUserRepository;
    type Activities = InMemoryActivityRepository;

    pub(super) struct Campus {
        pub(super) accounts: Arc<AccountService<Users, Activities>>,
        pub(super) activities: Arc<ActivityService<Activities, Users>>,
        pub(super) reports: Arc<ReportService<Users, Activities>>,
        pub(super) admin: UserId,
    }

    pub(super) fn campus() -> Campus {
        let users = Arc::new(InMemoryUserRepository::default());
        let activities = Arc::new(InMemoryActivityRepository::default());
        let admin = users
            .insert(UserRecord {
                id: UserId("usr-registrar".to_string()),
                name: "Registrar".to_string(),
                email: "registrar@campus.test".to_string(),
                role: UserRole::Admin,
                program_category: None,
                program: None,
                specialization: None,
                admission_year: None,
                is_active: true,
                created_at: Utc::now(),
            })
            .expect("seed admin")
            .id;

        Campus {
            accounts: Arc::new(AccountService::new(
                users.clone(),
                activities.clone(),
                ProfileGuard::default(),
            )),
            activities: Arc::new(ActivityService::new(
                activities.clone(),
                users.clone(),
                ReviewConfig {
                    max_credits_per_activity: 5.0,
                },
            )),
            reports: Arc::new(ReportService::new(users, activities)),
            admin,
        }
    }

    pub(super) fn student(
        name: &str,
        category: &str,
        program: &str,
        specialization: &str,
    ) -> Registration {
        Registration {
            name: name.to_string(),
            email: format!("{}@campus.test", name.to_lowercase().replace(' ', ".")),
            role: UserRole::Student,
            program_category: Some(category.to_string()),
            program: Some(program.to_string()),
            specialization: Some(specialization.to_string()),
            admission_year: Some(2023),
        }
    }

    pub(super) fn faculty(name: &str, category: Option<&str>) -> Registration {
        Registration {
            name: name.to_string(),
            email: format!("{}@campus.test", name.to_lowercase().replace(' ', ".")),
            role: UserRole::Faculty,
            program_category: category.map(str::to_string),
            program: None,
            specialization: None,
            admission_year: None,
        }
    }

    pub(super) fn submission(title: &str, activity_type: ActivityType) -> ActivitySubmission {
        ActivitySubmission {
            title: title.to_string(),
            activity_type,
            description: "Participated and presented".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 18).expect("valid date"),
            duration: "1 day".to_string(),
            organizer: "Student Council".to_string(),
            proof_document: ProofDocument {
                file_name: "proof.jpg".to_string(),
                storage_key: format!("proofs/{}.jpg", title.to_lowercase().replace(' ', "-")),
            },
        }
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use activity_tracker::access::AccessError;
use activity_tracker::activities::{
    activity_router, ActivityListQuery, ActivityServiceError, ActivityStatus, ActivityType,
    ReviewDecision, ReviewError, ReviewRequest,
};
use activity_tracker::identity::ACTOR_HEADER;
use activity_tracker::programs::ProgramCategory;

use common::*;

fn approve(credits: f64) -> ReviewRequest {
    ReviewRequest {
        decision: ReviewDecision::Approved,
        remarks: None,
        credits: Some(credits),
    }
}

#[test]
fn category_scoped_review_round_trip() {
    let campus = campus();
    let robotics = campus
        .accounts
        .register(student(
            "Neha Singh",
            "ENGINEERING",
            "B.Tech",
            "Robotics & Automation",
        ))
        .expect("engineering student");
    let physics = campus
        .accounts
        .register(student("Omar Ali", "Science", "B.Sc", "Physics"))
        .expect("science student");
    let science_faculty = campus
        .accounts
        .register(faculty("Dr Priya Bose", Some("SCIENCE")))
        .expect("science faculty");

    assert_eq!(robotics.program_category, Some(ProgramCategory::Engineering));

    let robotics_activity = campus
        .activities
        .submit(&robotics.id, submission("Robo league", ActivityType::Competition))
        .expect("submit");
    let physics_activity = campus
        .activities
        .submit(&physics.id, submission("Optics workshop", ActivityType::Workshop))
        .expect("submit");

    let visible = campus
        .activities
        .list(&science_faculty.id, &ActivityListQuery::default())
        .expect("scoped list");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, physics_activity.id);

    match campus
        .activities
        .review(&science_faculty.id, &robotics_activity.id, &approve(1.0))
    {
        Err(ActivityServiceError::Access(AccessError::OutOfScope { .. })) => {}
        other => panic!("expected out of scope, got {other:?}"),
    }

    match campus
        .activities
        .review(&science_faculty.id, &physics_activity.id, &approve(7.5))
    {
        Err(ActivityServiceError::Review(ReviewError::InvalidCredits { max, .. })) => {
            assert_eq!(max, 5.0);
        }
        other => panic!("expected credit cap violation, got {other:?}"),
    }

    let approved = campus
        .activities
        .review(&science_faculty.id, &physics_activity.id, &approve(2.0))
        .expect("in-scope approval");
    assert_eq!(approved.status, ActivityStatus::Approved);

    let report = campus
        .reports
        .credit_report(&campus.admin)
        .expect("admin report");
    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].name, "Neha Singh");
    assert_eq!(report.rows[0].pending, 1);
    assert_eq!(report.rows[1].total_credits, 2.0);
    assert_eq!(report.totals.total_credits, 2.0);

    assert!(campus.reports.credit_report(&science_faculty.id).is_err());
}

#[test]
fn category_required_for_faculty_and_empty_scope_sees_nothing() {
    let campus = campus();
    let missing_category = campus
        .accounts
        .create(&campus.admin, faculty("Dr Legacy", None))
        .err();
    assert!(missing_category.is_some(), "new faculty accounts require a category");

    let student = campus
        .accounts
        .register(student("Ria Das", "COMPUTER_APPLICATIONS", "BCA", "Cloud Computing"))
        .expect("student");
    let activity = campus
        .activities
        .submit(&student.id, submission("Code sprint", ActivityType::Hackathon))
        .expect("submit");

    let empty_category = campus
        .accounts
        .register(faculty("Dr Pharma", Some("PHARMACY")))
        .expect("faculty");
    let visible = campus
        .activities
        .list(&empty_category.id, &ActivityListQuery::default())
        .expect("list");
    assert!(visible.is_empty());

    let rejected = campus
        .activities
        .review(
            &campus.admin,
            &activity.id,
            &ReviewRequest {
                decision: ReviewDecision::Rejected,
                remarks: Some("Duplicate entry".to_string()),
                credits: None,
            },
        )
        .expect("admin rejects");
    assert_eq!(rejected.status, ActivityStatus::Rejected);
    assert_eq!(rejected.credits, 0.0);
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[tokio::test]
async fn activity_routes_drive_the_review_workflow() {
    let campus = campus();
    let student = campus
        .accounts
        .register(student("Sara Paul", "LAW", "LL.M.", "Corporate Law"))
        .expect("student");
    let reviewer = campus
        .accounts
        .register(faculty("Dr Tara Iyer", Some("Law")))
        .expect("faculty");
    let router = activity_router(campus.activities.clone());

    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/activities")
                .header(header::CONTENT_TYPE, "application/json")
                .header(ACTOR_HEADER, student.id.0.as_str())
                .body(Body::from(
                    serde_json::to_vec(&submission("Moot court", ActivityType::Competition))
                        .expect("serialize"),
                ))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = read_json_body(response).await;
    let activity_id = created["id"].as_str().expect("id").to_string();

    let review = |decision: Value| {
        Request::put(format!("/api/v1/activities/{activity_id}/review"))
            .header(header::CONTENT_TYPE, "application/json")
            .header(ACTOR_HEADER, reviewer.id.0.as_str())
            .body(Body::from(serde_json::to_vec(&decision).expect("serialize")))
            .expect("request")
    };

    let response = router
        .clone()
        .oneshot(review(json!({ "decision": "approved", "credits": 3 })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["approvedBy"], reviewer.id.0.as_str());
    assert_eq!(payload["credits"], 3.0);

    let response = router
        .oneshot(review(json!({ "decision": "rejected" })))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
