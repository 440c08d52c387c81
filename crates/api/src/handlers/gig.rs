//! Handlers for the `/gigs` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::gig::{CreateGig, Gig, UpdateGig};
use setlist_db::repositories::GigRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{normalize_optional, normalize_patch, require_text};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/gigs
///
/// List the caller's gigs, most recent date first (undated gigs last).
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Gig>>> {
    let gigs = GigRepo::list(&state.pool, user.user_id).await?;
    Ok(Json(gigs))
}

/// POST /api/v1/gigs
///
/// Create a new gig. Title is required.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateGig>,
) -> AppResult<impl IntoResponse> {
    let input = CreateGig {
        title: require_text(&input.title, "title")?,
        venue: normalize_optional(input.venue),
        gig_date: input.gig_date,
        notes: input.notes,
    };
    let gig = GigRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(gig)))
}

/// GET /api/v1/gigs/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Gig>> {
    let gig = GigRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Gig", id }))?;
    Ok(Json(gig))
}

/// PATCH /api/v1/gigs/{id}
///
/// Partially update a gig. An explicit `null` clears venue, gig_date, or
/// notes.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateGig>,
) -> AppResult<Json<Gig>> {
    let input = UpdateGig {
        title: input
            .title
            .map(|t| require_text(&t, "title"))
            .transpose()?,
        venue: normalize_patch(input.venue),
        gig_date: input.gig_date,
        notes: input.notes,
    };
    let gig = GigRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Gig", id }))?;
    Ok(Json(gig))
}

/// DELETE /api/v1/gigs/{id}
///
/// Delete a gig; linked sets are unlinked, not deleted.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = GigRepo::delete(&state.pool, user.user_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Gig", id }));
    }
    Ok(StatusCode::NO_CONTENT)
}
