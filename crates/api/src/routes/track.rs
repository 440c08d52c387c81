//! Route definitions for the `/tracks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::track;
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET    /             -> list (?q, limit, offset)
/// POST   /             -> create
/// GET    /{id}         -> get
/// PATCH  /{id}         -> update
/// DELETE /{id}         -> delete
/// GET    /{id}/usage   -> usage report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(track::list).post(track::create))
        .route(
            "/{id}",
            get(track::get).patch(track::update).delete(track::delete),
        )
        .route("/{id}/usage", get(track::usage))
}
