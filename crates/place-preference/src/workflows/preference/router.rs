use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::catalog_view;
use super::directory::{
    DirectoryError, EmployeeDirectory, EmployeeLookupResponse, EMPLOYEE_LOOKUP_PATH,
};
use super::domain::EmployeeId;
use super::intake::{IntakeError, SheetIntakeService};
use super::payload::SubmissionPayload;
use super::sheet::SheetWriter;
use super::submission::SUBMISSION_PATH;

#[derive(Debug, Deserialize)]
pub(crate) struct LookupQuery {
    #[serde(default)]
    emp_id: Option<String>,
}

/// Employee lookup endpoint backed by `directory`.
pub fn employee_router<D>(directory: Arc<D>) -> Router
where
    D: EmployeeDirectory + 'static,
{
    Router::new()
        .route(EMPLOYEE_LOOKUP_PATH, get(lookup_handler::<D>))
        .with_state(directory)
}

/// Sheet submission endpoint plus the read-only option catalog.
pub fn sheet_router<W>(service: Arc<SheetIntakeService<W>>) -> Router
where
    W: SheetWriter + 'static,
{
    Router::new()
        .route(SUBMISSION_PATH, post(submit_handler::<W>))
        .route("/api/v1/catalog", get(catalog_handler))
        .with_state(service)
}

pub(crate) async fn lookup_handler<D>(
    State(directory): State<Arc<D>>,
    Query(query): Query<LookupQuery>,
) -> Response
where
    D: EmployeeDirectory + 'static,
{
    let raw = query.emp_id.unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        let payload = json!({ "message": "emp_id is required" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    let id = EmployeeId(trimmed.to_string());
    match directory.fetch_employee(&id).await {
        Ok(profile) => (StatusCode::OK, Json(EmployeeLookupResponse::from(&profile))).into_response(),
        Err(DirectoryError::NotFound(_)) => {
            let payload = json!({ "message": "Employee not found" });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "message": other.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn submit_handler<W>(
    State(service): State<Arc<SheetIntakeService<W>>>,
    Json(payload): Json<SubmissionPayload>,
) -> Response
where
    W: SheetWriter + 'static,
{
    match service.accept(&payload) {
        Ok(()) => {
            let body = json!({
                "message": "Submission recorded",
                "userId": payload.user_id(),
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(IntakeError::Rejected(rejection)) => {
            let body = json!({ "message": rejection.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
        }
        Err(IntakeError::Sheet(error)) => {
            let body = json!({ "message": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

pub(crate) async fn catalog_handler() -> Response {
    (StatusCode::OK, Json(catalog_view())).into_response()
}
