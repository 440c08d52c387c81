//! Gig entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `gigs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Gig {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub venue: Option<String>,
    pub gig_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for creating a new gig.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub venue: Option<String>,
    pub gig_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for partially updating a gig.
///
/// Nullable columns are tri-state: absent leaves the value unchanged, an
/// explicit `null` clears it, a value replaces it.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateGig {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub venue: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub gig_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub notes: Option<Option<String>>,
}
