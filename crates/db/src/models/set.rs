//! Set entity model and DTOs.

use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `sets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Set {
    pub id: DbId,
    pub user_id: DbId,
    pub gig_id: Option<DbId>,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new set.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSet {
    pub name: String,
    pub gig_id: Option<DbId>,
    pub notes: Option<String>,
}

/// DTO for partially updating a set.
///
/// Nullable columns are tri-state: absent leaves the value unchanged, an
/// explicit `null` clears it (for `gig_id`, unlinks the gig), a value
/// replaces it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSet {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub gig_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
}
