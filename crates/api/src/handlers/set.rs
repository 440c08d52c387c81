//! Handlers for the `/sets` resource.
//!
//! The set detail view is the read-side mirror of the ordering invariant:
//! items come back sorted by position ascending, each with its track summary.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use setlist_core::error::CoreError;
use setlist_core::types::{DbId, Timestamp};
use setlist_db::models::set::{CreateSet, Set, UpdateSet};
use setlist_db::models::set_item::SetItemWithTrack;
use setlist_db::repositories::{GigRepo, SetItemRepo, SetRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::require_text;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Track summary nested inside a set item.
#[derive(Debug, Serialize)]
pub struct TrackSummary {
    pub id: DbId,
    pub title: String,
    pub artist: String,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub energy: Option<String>,
}

/// One slot of the set's running order, with its joined track.
#[derive(Debug, Serialize)]
pub struct SetItemView {
    pub id: DbId,
    pub set_id: DbId,
    pub track_id: DbId,
    pub position: i32,
    pub notes: Option<String>,
    pub track: TrackSummary,
}

/// Response for `GET /sets/{id}`: the set plus its ordered items.
#[derive(Debug, Serialize)]
pub struct SetDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub gig_id: Option<DbId>,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub items: Vec<SetItemView>,
}

impl From<SetItemWithTrack> for SetItemView {
    fn from(row: SetItemWithTrack) -> Self {
        SetItemView {
            id: row.id,
            set_id: row.set_id,
            track_id: row.track_id,
            position: row.position,
            notes: row.notes,
            track: TrackSummary {
                id: row.track_id,
                title: row.track_title,
                artist: row.track_artist,
                bpm: row.track_bpm,
                musical_key: row.track_musical_key,
                energy: row.track_energy,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/sets
///
/// List the caller's sets, newest first (without items).
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Set>>> {
    let sets = SetRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(sets))
}

/// POST /api/v1/sets
///
/// Create a new set, optionally linked to an owned gig.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateSet>,
) -> AppResult<impl IntoResponse> {
    let input = CreateSet {
        name: require_text(&input.name, "name")?,
        gig_id: input.gig_id,
        notes: input.notes,
    };

    if let Some(gig_id) = input.gig_id {
        ensure_gig_owned(&state, user.user_id, gig_id).await?;
    }

    let set = SetRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// GET /api/v1/sets/{id}
///
/// The set with its ordered items, positions ascending.
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SetDetail>> {
    let set = SetRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Set", id }))?;

    let items = SetItemRepo::list_for_set(&state.pool, set.id)
        .await?
        .into_iter()
        .map(SetItemView::from)
        .collect();

    Ok(Json(SetDetail {
        id: set.id,
        user_id: set.user_id,
        gig_id: set.gig_id,
        name: set.name,
        notes: set.notes,
        created_at: set.created_at,
        items,
    }))
}

/// PATCH /api/v1/sets/{id}
///
/// Partially update a set. An explicit `null` gig_id unlinks the gig; a new
/// gig_id must reference an owned gig.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSet>,
) -> AppResult<Json<Set>> {
    let input = UpdateSet {
        name: input.name.map(|n| require_text(&n, "name")).transpose()?,
        gig_id: input.gig_id,
        notes: input.notes,
    };

    if let Some(Some(gig_id)) = input.gig_id {
        ensure_gig_owned(&state, user.user_id, gig_id).await?;
    }

    let set = SetRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Set", id }))?;
    Ok(Json(set))
}

/// DELETE /api/v1/sets/{id}
///
/// Delete a set and (by cascade) all of its items.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = SetRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Set", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Verify that a gig exists and belongs to the caller before linking it.
async fn ensure_gig_owned(state: &AppState, user_id: DbId, gig_id: DbId) -> Result<(), AppError> {
    GigRepo::find_by_id(&state.pool, user_id, gig_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Gig",
            id: gig_id,
        }))?;
    Ok(())
}
