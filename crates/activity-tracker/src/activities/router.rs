use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

use super::domain::{ActivityId, ActivityListQuery, ActivitySubmission};
use super::repository::ActivityRepository;
use super::review::{ReviewError, ReviewRequest};
use super::service::{ActivityService, ActivityServiceError};
use crate::accounts::UserRepository;
use crate::identity::{actor_id, error_response, malformed_body, unauthenticated};
use crate::storage::RepositoryError;

/// Router builder exposing submission, listing, and review endpoints.
pub fn activity_router<A, U>(service: Arc<ActivityService<A, U>>) -> Router
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/activities",
            post(submit_handler::<A, U>).get(list_handler::<A, U>),
        )
        .route(
            "/api/v1/activities/:activity_id",
            get(get_handler::<A, U>).delete(withdraw_handler::<A, U>),
        )
        .route(
            "/api/v1/activities/:activity_id/review",
            put(review_handler::<A, U>),
        )
        .with_state(service)
}

pub(crate) fn status_for(error: &ActivityServiceError) -> StatusCode {
    match error {
        ActivityServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ActivityServiceError::Review(ReviewError::AlreadyReviewed { .. }) => StatusCode::CONFLICT,
        ActivityServiceError::Review(_) => StatusCode::BAD_REQUEST,
        ActivityServiceError::Access(_) => StatusCode::FORBIDDEN,
        ActivityServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ActivityServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ActivityServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn failure(error: ActivityServiceError) -> Response {
    error_response(status_for(&error), error.to_string())
}

pub(crate) async fn submit_handler<A, U>(
    State(service): State<Arc<ActivityService<A, U>>>,
    headers: HeaderMap,
    payload: Result<Json<ActivitySubmission>, JsonRejection>,
) -> Response
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.submit(&actor, submission) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn list_handler<A, U>(
    State(service): State<Arc<ActivityService<A, U>>>,
    headers: HeaderMap,
    Query(query): Query<ActivityListQuery>,
) -> Response
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.list(&actor, &query) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn get_handler<A, U>(
    State(service): State<Arc<ActivityService<A, U>>>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
) -> Response
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.get(&actor, &ActivityId(activity_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn review_handler<A, U>(
    State(service): State<Arc<ActivityService<A, U>>>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.review(&actor, &ActivityId(activity_id), &request) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn withdraw_handler<A, U>(
    State(service): State<Arc<ActivityService<A, U>>>,
    headers: HeaderMap,
    Path(activity_id): Path<String>,
) -> Response
where
    A: ActivityRepository + 'static,
    U: UserRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.withdraw(&actor, &ActivityId(activity_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => failure(error),
    }
}
