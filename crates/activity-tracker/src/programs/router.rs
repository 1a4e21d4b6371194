use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::catalog::ProgramCatalog;
use super::domain::{CategoryEntry, Program};

#[derive(Debug, Deserialize)]
pub(crate) struct CategoryQuery {
    #[serde(default)]
    pub(crate) category: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpecializationQuery {
    #[serde(default)]
    pub(crate) category: String,
    #[serde(default)]
    pub(crate) program: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SpecializationsResponse {
    pub(crate) specializations: Vec<&'static str>,
}

/// Read-only catalog endpoints backing the registration and filter dropdowns.
pub fn catalog_router(catalog: Arc<ProgramCatalog>) -> Router {
    Router::new()
        .route("/api/v1/programs/categories", get(categories_handler))
        .route("/api/v1/programs", get(programs_handler))
        .route(
            "/api/v1/programs/specializations",
            get(specializations_handler),
        )
        .with_state(catalog)
}

pub(crate) async fn categories_handler(
    State(catalog): State<Arc<ProgramCatalog>>,
) -> Json<Vec<CategoryEntry>> {
    Json(catalog.categories())
}

pub(crate) async fn programs_handler(
    State(catalog): State<Arc<ProgramCatalog>>,
    Query(query): Query<CategoryQuery>,
) -> Json<Vec<Program>> {
    Json(catalog.programs_for(&query.category).to_vec())
}

pub(crate) async fn specializations_handler(
    State(catalog): State<Arc<ProgramCatalog>>,
    Query(query): Query<SpecializationQuery>,
) -> Json<SpecializationsResponse> {
    let specializations = catalog
        .specializations_for(&query.category, &query.program)
        .to_vec();
    Json(SpecializationsResponse { specializations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let router = catalog_router(Arc::new(ProgramCatalog::standard()));
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        (status, serde_json::from_slice(&body).expect("json payload"))
    }

    #[tokio::test]
    async fn lists_categories() {
        let (status, body) = get_json("/api/v1/programs/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["key"], "ENGINEERING");
        assert_eq!(body[0]["value"], "Engineering & Technology");
    }

    #[tokio::test]
    async fn unknown_category_returns_empty_list() {
        let (status, body) = get_json("/api/v1/programs?category=Astrology").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Array(Vec::new()));
    }

    #[tokio::test]
    async fn programs_carry_camel_case_fields() {
        let (_, body) = get_json("/api/v1/programs?category=ENGINEERING").await;
        assert_eq!(body[0]["degreeCode"], "B.Tech");
        assert_eq!(body[0]["lateralEntry"], true);
    }

    #[tokio::test]
    async fn specializations_by_display_value() {
        let (_, body) = get_json(concat!(
            "/api/v1/programs/specializations",
            "?category=Engineering%20%26%20Technology&program=B.Tech"
        ))
        .await;
        let list = body["specializations"].as_array().expect("array");
        assert!(list.iter().any(|value| value == "Robotics & Automation"));
    }
}
