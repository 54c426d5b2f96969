use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Query, Request, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::error::ApiError;
use super::AppState;
use crate::models::{Calories, Entry, NewEntry};

type Params = Query<HashMap<String, String>>;

/// Total calories for one day
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: Calories,
}

/// Reads `?date=YYYY-MM-DD`, falling back to today (UTC).
fn requested_date(
    state: &AppState,
    params: &HashMap<String, String>,
) -> Result<NaiveDate, ApiError> {
    match params.get("date").map(|d| d.trim()).filter(|d| !d.is_empty()) {
        None => Ok(state.entries.today()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::InvalidDate(raw.to_string())),
    }
}

/// GET /api/entries?date=YYYY-MM-DD
pub async fn list_entries(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let date = requested_date(&state, &params)?;
    Ok(Json(state.entries.list_for_date(date)?))
}

/// GET /api/total?date=YYYY-MM-DD
pub async fn total(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<TotalResponse>, ApiError> {
    let date = requested_date(&state, &params)?;
    let total = state.entries.total_for_date(date)?;
    Ok(Json(TotalResponse { total }))
}

/// POST /api/entries
///
/// The body is taken raw so that undecodable JSON and invalid fields get
/// distinct error messages.
pub async fn create_entry(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let body = body.map_err(|rejection| {
        tracing::debug!("Rejected request body: {}", rejection);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::BodyTooLarge
        } else {
            ApiError::MalformedBody
        }
    })?;
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!("Rejected request body: {}", e);
        ApiError::MalformedBody
    })?;
    let new_entry = NewEntry::validate(&payload)?;

    let entry = state.entries.create(new_entry)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/entries/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    // An id that does not even decode cannot name a stored entry
    let Ok(Path(id)) = id else {
        return Err(ApiError::EntryNotFound);
    };
    if state.entries.delete_by_id(&id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::EntryNotFound)
    }
}

/// DELETE /api/entries?date=YYYY-MM-DD
pub async fn clear_entries(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<StatusCode, ApiError> {
    let date = requested_date(&state, &params)?;
    state.entries.clear_date(date)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Anything else under /api
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Everything outside the API: files from the static directory.
///
/// Paths under `/api` that no route matched still get the JSON 404.
pub async fn static_files(files: ServeDir, request: Request) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return ApiError::RouteNotFound.into_response();
    }

    match files.oneshot(request).await {
        Ok(response) => response.into_response(),
        // ServeDir without a fallback service never fails
        Err(never) => match never {},
    }
}
