//! Handlers for set composition: append, edit, remove, and reorder items.
//!
//! Every handler first resolves the set through the caller's account, so a
//! set owned by someone else 404s before any item is touched.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::set_item::{CreateSetItem, ReorderOutcome, SetItem, UpdateSetItem};
use setlist_db::repositories::{SetItemRepo, SetRepo, TrackRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /sets/{setId}/items/reorder`: the complete new
/// running order as item ids.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<DbId>,
}

/// POST /api/v1/sets/{set_id}/items
///
/// Append a track to the end of the set; the new item's position equals the
/// current item count.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(set_id): Path<DbId>,
    Json(input): Json<CreateSetItem>,
) -> AppResult<impl IntoResponse> {
    ensure_set_owned(&state, user.user_id, set_id).await?;

    TrackRepo::find_by_id(&state.pool, user.user_id, input.track_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: input.track_id,
        }))?;

    let item =
        SetItemRepo::append(&state.pool, set_id, input.track_id, input.notes.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /api/v1/sets/{set_id}/items/{item_id}
///
/// Update an item's notes: absent leaves them unchanged, an explicit `null`
/// clears them. Positions cannot be edited individually; use reorder.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((set_id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSetItem>,
) -> AppResult<Json<SetItem>> {
    ensure_set_owned(&state, user.user_id, set_id).await?;

    let item = SetItemRepo::update_notes(&state.pool, set_id, item_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SetItem",
            id: item_id,
        }))?;
    Ok(Json(item))
}

/// DELETE /api/v1/sets/{set_id}/items/{item_id}
///
/// Remove an item; later positions compact down by one atomically.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((set_id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_set_owned(&state, user.user_id, set_id).await?;

    let removed = SetItemRepo::remove(&state.pool, set_id, item_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "SetItem",
            id: item_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sets/{set_id}/items/reorder
///
/// Atomically rewrite the set's running order. The supplied order must be a
/// permutation of exactly the current item ids; a rejected order leaves the
/// persisted order completely unchanged, so callers may safely retry with a
/// corrected permutation.
pub async fn reorder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(set_id): Path<DbId>,
    Json(input): Json<ReorderRequest>,
) -> AppResult<StatusCode> {
    ensure_set_owned(&state, user.user_id, set_id).await?;

    match SetItemRepo::reorder(&state.pool, set_id, &input.order).await? {
        ReorderOutcome::Applied => Ok(StatusCode::NO_CONTENT),
        ReorderOutcome::Rejected(violation) => Err(AppError::Core(violation.into())),
    }
}

/// Verify that a set exists and belongs to the caller.
async fn ensure_set_owned(state: &AppState, user_id: DbId, set_id: DbId) -> Result<(), AppError> {
    SetRepo::find_by_id(&state.pool, user_id, set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Set",
            id: set_id,
        }))?;
    Ok(())
}
