//! Route definitions for the `/gigs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::gig;
use crate::state::AppState;

/// Routes mounted at `/gigs`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get
/// PATCH  /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(gig::list).post(gig::create))
        .route(
            "/{id}",
            get(gig::get).patch(gig::update).delete(gig::delete),
        )
}
