//! Set item model: one ordered slot within a set, referencing a track.

use serde::{Deserialize, Serialize};
use setlist_core::ordering::PermutationError;
use setlist_core::types::DbId;
use sqlx::FromRow;

/// A row from the `set_items` table.
///
/// `position` is the zero-based rank of the item within its set. Within a
/// set, positions are always exactly `{0..n-1}`: dense, no gaps, no
/// duplicates.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SetItem {
    pub id: DbId,
    pub set_id: DbId,
    pub track_id: DbId,
    pub position: i32,
    pub notes: Option<String>,
}

/// A set item joined with a summary of its track, for the set detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SetItemWithTrack {
    pub id: DbId,
    pub set_id: DbId,
    pub track_id: DbId,
    pub position: i32,
    pub notes: Option<String>,
    pub track_title: String,
    pub track_artist: String,
    pub track_bpm: Option<i32>,
    pub track_musical_key: Option<String>,
    pub track_energy: Option<String>,
}

/// DTO for appending a track to a set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSetItem {
    pub track_id: DbId,
    pub notes: Option<String>,
}

/// DTO for updating an item's notes. Position is deliberately not editable
/// here; positions are only rewritten in bulk by reorder.
///
/// `notes` is tri-state: absent leaves the notes unchanged, an explicit
/// `null` clears them, a value replaces them.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSetItem {
    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
}

/// Result of a reorder attempt.
#[derive(Debug)]
pub enum ReorderOutcome {
    /// All positions were rewritten atomically.
    Applied,
    /// The supplied order was not a permutation of the current item ids;
    /// nothing was changed.
    Rejected(PermutationError),
}
