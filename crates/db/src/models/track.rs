//! Track entity model and DTOs.

use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tracks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Track {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub artist: String,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub energy: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new track.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub artist: String,
    pub bpm: Option<i32>,
    pub musical_key: Option<String>,
    pub energy: Option<String>,
    pub notes: Option<String>,
}

/// DTO for partially updating a track.
///
/// Nullable columns are tri-state: absent leaves the value unchanged, an
/// explicit `null` clears it, a value replaces it. Title and artist are
/// required columns, so they only support absent-or-replace.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTrack {
    pub title: Option<String>,
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub bpm: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub musical_key: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub energy: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
}
