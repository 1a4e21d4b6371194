use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{ProfileUpdate, Registration, StudentQuery, UserId};
use super::repository::UserRepository;
use super::service::{AccountService, AccountServiceError};
use crate::activities::ActivityRepository;
use crate::identity::{actor_id, error_response, malformed_body, unauthenticated};
use crate::storage::RepositoryError;

/// Router builder exposing registration and account management endpoints.
pub fn account_router<U, A>(service: Arc<AccountService<U, A>>) -> Router
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    Router::new()
        .route("/api/v1/auth/register", post(register_handler::<U, A>))
        .route("/api/v1/users", post(create_handler::<U, A>))
        .route("/api/v1/users/students", get(students_handler::<U, A>))
        .route(
            "/api/v1/users/:user_id",
            get(get_handler::<U, A>)
                .put(update_handler::<U, A>)
                .delete(delete_handler::<U, A>),
        )
        .route("/api/v1/users/:user_id/status", put(status_handler::<U, A>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusChange {
    is_active: bool,
}

pub(crate) fn status_for(error: &AccountServiceError) -> StatusCode {
    match error {
        AccountServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        AccountServiceError::Access(_) => StatusCode::FORBIDDEN,
        AccountServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AccountServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AccountServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn failure(error: AccountServiceError) -> Response {
    error_response(status_for(&error), error.to_string())
}

pub(crate) async fn register_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Json(registration) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.register(registration) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn create_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    payload: Result<Json<Registration>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    let Json(registration) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.create(&actor, registration) {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn students_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    Query(query): Query<StudentQuery>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.list_students(&actor, &query) {
        Ok(students) => (StatusCode::OK, Json(students)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn get_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.get(&actor, &UserId(user_id)) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn update_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.update_profile(&actor, &UserId(user_id), update) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn status_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
    payload: Result<Json<StatusChange>, JsonRejection>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    let Json(change) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };
    match service.set_active(&actor, &UserId(user_id), change.is_active) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => failure(error),
    }
}

pub(crate) async fn delete_handler<U, A>(
    State(service): State<Arc<AccountService<U, A>>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.delete(&actor, &UserId(user_id)) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(error) => failure(error),
    }
}
