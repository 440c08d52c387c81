//! Route definitions for the `/sets` resource and its nested items.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::set;
use crate::handlers::set_item;
use crate::state::AppState;

/// Routes mounted at `/sets`.
///
/// `/items/reorder` is registered alongside `/items/{item_id}`; axum's
/// matcher prefers the static segment, so `reorder` is never parsed as an
/// item id.
///
/// ```text
/// GET    /                             -> list
/// POST   /                             -> create
/// GET    /{id}                         -> get (with ordered items)
/// PATCH  /{id}                         -> update
/// DELETE /{id}                         -> delete
///
/// POST   /{set_id}/items               -> append
/// PUT    /{set_id}/items/reorder       -> reorder
/// PATCH  /{set_id}/items/{item_id}     -> update notes
/// DELETE /{set_id}/items/{item_id}     -> remove
/// ```
pub fn router() -> Router<AppState> {
    let item_routes = Router::new()
        .route("/", post(set_item::create))
        .route("/reorder", put(set_item::reorder))
        .route(
            "/{item_id}",
            patch(set_item::update).delete(set_item::delete),
        );

    Router::new()
        .route("/", get(set::list).post(set::create))
        .route(
            "/{id}",
            get(set::get).patch(set::update).delete(set::delete),
        )
        .nest("/{set_id}/items", item_routes)
}
