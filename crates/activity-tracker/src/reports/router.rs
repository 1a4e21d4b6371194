use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::service::{ReportError, ReportService};
use crate::accounts::UserRepository;
use crate::activities::ActivityRepository;
use crate::identity::{actor_id, error_response, unauthenticated};
use crate::storage::RepositoryError;

pub fn report_router<U, A>(service: Arc<ReportService<U, A>>) -> Router
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    Router::new()
        .route("/api/v1/reports/credits", get(credits_handler::<U, A>))
        .route("/api/v1/reports/credits.csv", get(credits_csv_handler::<U, A>))
        .with_state(service)
}

fn status_for(error: &ReportError) -> StatusCode {
    match error {
        ReportError::Access(_) => StatusCode::FORBIDDEN,
        ReportError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ReportError::Repository(_) | ReportError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) async fn credits_handler<U, A>(
    State(service): State<Arc<ReportService<U, A>>>,
    headers: HeaderMap,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.credit_report(&actor) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(error) => error_response(status_for(&error), error.to_string()),
    }
}

pub(crate) async fn credits_csv_handler<U, A>(
    State(service): State<Arc<ReportService<U, A>>>,
    headers: HeaderMap,
) -> Response
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    let Some(actor) = actor_id(&headers) else {
        return unauthenticated();
    };
    match service.credit_report_csv(&actor) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"credit-report.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => error_response(status_for(&error), error.to_string()),
    }
}
