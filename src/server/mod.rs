//! HTTP layer: the `/api` routes plus static file serving for the front end.
//!
//! # Endpoints
//!
//! - `GET /api/entries?date=YYYY-MM-DD`: entries for a day (default today, UTC)
//! - `GET /api/total?date=YYYY-MM-DD`: `{ "total": N }` for a day
//! - `POST /api/entries`: log `{ "name": ..., "calories": ... }`
//! - `DELETE /api/entries/{id}`: delete one entry
//! - `DELETE /api/entries?date=YYYY-MM-DD`: clear a day
//!
//! Other `/api` requests get a JSON 404; everything else is served from the
//! static directory.

mod error;
mod routes;

pub use error::ApiError;

use axum::{
    extract::Request,
    routing::{delete, get},
    Router,
};
use std::path::Path;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::db::EntryRepository;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub entries: EntryRepository,
}

impl AppState {
    pub fn new(entries: EntryRepository) -> Self {
        Self { entries }
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/entries",
            get(routes::list_entries)
                .post(routes::create_entry)
                .delete(routes::clear_entries),
        )
        .route("/entries/{id}", delete(routes::delete_entry))
        .route("/total", get(routes::total))
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
}

/// Builds the full application: API, static files, panic recovery and tracing.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let files = ServeDir::new(static_dir.as_ref());

    Router::new()
        .nest("/api", api_routes())
        .fallback(move |request: Request| routes::static_files(files.clone(), request))
        .with_state(state)
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
}
