//! Handlers for the `/tracks` resource, including the usage report.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::track::{CreateTrack, Track, UpdateTrack};
use setlist_db::repositories::{TrackRepo, UsageRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{normalize_optional, normalize_patch, require_text};
use crate::middleware::auth::AuthUser;
use crate::query::TrackSearchParams;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Response for `GET /tracks`.
#[derive(Debug, Serialize)]
pub struct TrackListResponse {
    pub tracks: Vec<Track>,
    pub total: i64,
}

/// Gig summary embedded in a usage record when the set is linked to a gig.
#[derive(Debug, Serialize)]
pub struct GigSummary {
    pub id: DbId,
    pub title: String,
    pub venue: Option<String>,
    pub gig_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// One place a track was used: a set, the position within it, and the gig
/// the set was played at (if any).
#[derive(Debug, Serialize)]
pub struct UsageRecord {
    pub set_item_id: DbId,
    pub set_id: DbId,
    pub set_name: String,
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gig: Option<GigSummary>,
}

/// Response for `GET /tracks/{id}/usage`.
#[derive(Debug, Serialize)]
pub struct TrackUsageResponse {
    pub track: Track,
    pub usage: Vec<UsageRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/tracks?q=&limit=&offset=
///
/// List the caller's tracks, newest first, with optional substring search.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<TrackSearchParams>,
) -> AppResult<Json<TrackListResponse>> {
    let (tracks, total) = TrackRepo::search(
        &state.pool,
        user.user_id,
        params.q.as_deref(),
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(TrackListResponse { tracks, total }))
}

/// POST /api/v1/tracks
///
/// Create a new track. Title and artist are required.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTrack>,
) -> AppResult<impl IntoResponse> {
    let input = CreateTrack {
        title: require_text(&input.title, "title")?,
        artist: require_text(&input.artist, "artist")?,
        bpm: input.bpm,
        musical_key: normalize_optional(input.musical_key),
        energy: normalize_optional(input.energy),
        notes: input.notes,
    };
    let track = TrackRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// GET /api/v1/tracks/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Track>> {
    let track = TrackRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(track))
}

/// PATCH /api/v1/tracks/{id}
///
/// Partially update a track. Supplied title/artist must not be blank; an
/// explicit `null` clears the nullable fields.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTrack>,
) -> AppResult<Json<Track>> {
    let input = UpdateTrack {
        title: input
            .title
            .map(|t| require_text(&t, "title"))
            .transpose()?,
        artist: input
            .artist
            .map(|a| require_text(&a, "artist"))
            .transpose()?,
        bpm: input.bpm,
        musical_key: normalize_patch(input.musical_key),
        energy: normalize_patch(input.energy),
        notes: input.notes,
    };
    let track = TrackRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(track))
}

/// DELETE /api/v1/tracks/{id}
///
/// Delete a track. Set items referencing it are removed and their sets
/// renumbered in the same transaction.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TrackRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/tracks/{id}/usage
///
/// The usage aggregation query: every set the track appears in, its position
/// there, the linked gig if any, and the derived last-played date.
pub async fn usage(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TrackUsageResponse>> {
    let track = TrackRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    let rows = UsageRepo::list_for_track(&state.pool, user.user_id, id).await?;

    let last_played = setlist_core::usage::last_played(rows.iter().map(|r| r.gig_date));

    let usage = rows
        .into_iter()
        .map(|row| UsageRecord {
            set_item_id: row.set_item_id,
            set_id: row.set_id,
            set_name: row.set_name,
            position: row.position,
            gig: row.gig_id.map(|gig_id| GigSummary {
                id: gig_id,
                // Joined gig columns are non-null whenever gig_id is.
                title: row.gig_title.unwrap_or_default(),
                venue: row.gig_venue,
                gig_date: row.gig_date,
                notes: row.gig_notes,
            }),
        })
        .collect();

    Ok(Json(TrackUsageResponse {
        track,
        usage,
        last_played,
    }))
}
