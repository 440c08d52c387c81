//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for the track list endpoint
/// (`?q=&limit=&offset=`).
///
/// `q` does case-insensitive substring matching; limit and offset are
/// clamped in the repository layer via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct TrackSearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
