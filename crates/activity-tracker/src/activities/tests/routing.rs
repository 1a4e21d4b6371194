use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::activities::{activity_router, ActivityService};
use crate::config::ReviewConfig;
use crate::identity::ACTOR_HEADER;
use crate::storage::InMemoryUserRepository;

fn json_request(
    method: &str,
    uri: &str,
    actor: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).expect("serialize")))
        .expect("request")
}

fn empty_request(method: &str, uri: &str, actor: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    builder.body(Body::empty()).expect("request")
}

fn submission_body() -> serde_json::Value {
    serde_json::to_value(submission("Quantum computing seminar")).expect("serialize")
}

#[tokio::test]
async fn submit_route_creates_pending_activity() {
    let (service, _, _) = build_service();
    let router = activity_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/activities",
            Some(SCIENCE_STUDENT),
            submission_body(),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "pending");
    assert_eq!(payload["studentId"], SCIENCE_STUDENT);
    assert_eq!(payload["activityType"], "workshop");
    assert_eq!(payload["proofDocument"]["fileName"], "certificate.pdf");
}

#[tokio::test]
async fn missing_identity_header_is_unauthorized() {
    let (service, _, _) = build_service();
    let router = activity_router(Arc::new(service));

    let response = router
        .oneshot(json_request("POST", "/api/v1/activities", None, submission_body()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn review_route_maps_workflow_errors() {
    let (service, _, _) = build_service();
    let record = service
        .submit(&uid(SCIENCE_STUDENT), submission("Field survey"))
        .expect("submit");
    let router = activity_router(Arc::new(service));
    let uri = format!("/api/v1/activities/{}/review", record.id);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(SCIENCE_FACULTY),
            json!({ "decision": "rejected", "credits": 1.0 }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(LAW_FACULTY),
            json!({ "decision": "approved" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(SCIENCE_FACULTY),
            json!({ "decision": "approved", "credits": 2.5, "remarks": "Great work" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["status"], "approved");
    assert_eq!(payload["credits"], 2.5);
    assert_eq!(payload["approvedBy"], SCIENCE_FACULTY);

    let response = router
        .oneshot(json_request(
            "PUT",
            &uri,
            Some(SCIENCE_FACULTY),
            json!({ "decision": "rejected" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_route_applies_status_filter() {
    let (service, _, _) = build_service();
    let record = service
        .submit(&uid(SCIENCE_STUDENT), submission("Field survey"))
        .expect("submit");
    service
        .submit(&uid(SCIENCE_STUDENT), submission("Lab safety course"))
        .expect("submit");
    service
        .review(&uid(ADMIN), &record.id, &approve(Some(1.0)))
        .expect("approve");
    let router = activity_router(Arc::new(service));

    let response = router
        .oneshot(empty_request(
            "GET",
            "/api/v1/activities?status=pending",
            Some(SCIENCE_FACULTY),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let items = payload.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Lab safety course");
}

#[tokio::test]
async fn get_and_withdraw_routes() {
    let (service, _, _) = build_service();
    let record = service
        .submit(&uid(SCIENCE_STUDENT), submission("Field survey"))
        .expect("submit");
    let router = activity_router(Arc::new(service));
    let uri = format!("/api/v1/activities/{}", record.id);

    let response = router
        .clone()
        .oneshot(empty_request("GET", &uri, Some(ENGINEERING_STUDENT)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = router
        .clone()
        .oneshot(empty_request("DELETE", &uri, Some(SCIENCE_STUDENT)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(empty_request("GET", &uri, Some(ADMIN)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(ActivityService::new(
        Arc::new(UnavailableRepository),
        seeded_users(),
        ReviewConfig::default(),
    ));
    let mut headers = HeaderMap::new();
    headers.insert(ACTOR_HEADER, HeaderValue::from_static(ADMIN));

    let response = crate::activities::router::get_handler::<
        UnavailableRepository,
        InMemoryUserRepository,
    >(State(service), headers, Path("act-000001".to_string()))
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests_with_error_payload() {
    let (service, _, _) = build_service();
    let router = activity_router(Arc::new(service));

    let mut unknown_type = submission_body();
    unknown_type["activityType"] = json!("karaoke");
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/activities",
            Some(SCIENCE_STUDENT),
            unknown_type,
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].as_str().is_some_and(|error| !error.is_empty()));

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/v1/activities/act-000001/review",
            Some(ADMIN),
            json!({ "remarks": "no decision given" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(read_json_body(response).await["error"].is_string());
}
