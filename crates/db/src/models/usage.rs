//! Flat row shape for the track usage aggregation query.

use chrono::NaiveDate;
use setlist_core::types::DbId;
use sqlx::FromRow;

/// One usage record: a set item referencing the track, joined to its owning
/// set and (when linked) that set's gig. Gig columns are NULL when the set
/// has no gig.
#[derive(Debug, Clone, FromRow)]
pub struct TrackUsageRow {
    pub set_item_id: DbId,
    pub set_id: DbId,
    pub set_name: String,
    pub position: i32,
    pub gig_id: Option<DbId>,
    pub gig_title: Option<String>,
    pub gig_venue: Option<String>,
    pub gig_date: Option<NaiveDate>,
    pub gig_notes: Option<String>,
}
