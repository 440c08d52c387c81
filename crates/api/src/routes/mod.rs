pub mod auth;
pub mod gig;
pub mod health;
pub mod set;
pub mod track;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                      register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
/// /auth/me                          current user (requires auth)
///
/// /tracks                           list (?q, limit, offset), create
/// /tracks/{id}                      get, update, delete
/// /tracks/{id}/usage                usage report (GET)
///
/// /gigs                             list, create
/// /gigs/{id}                        get, update, delete
///
/// /sets                             list, create
/// /sets/{id}                        get (with items), update, delete
/// /sets/{set_id}/items              append (POST)
/// /sets/{set_id}/items/reorder      reorder (PUT)
/// /sets/{set_id}/items/{item_id}    update notes, remove
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tracks", track::router())
        .nest("/gigs", gig::router())
        .nest("/sets", set::router())
}
