//! The track usage aggregation query.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::usage::TrackUsageRow;

/// Answers "in which sets, at what position, linked to which gig was this
/// track placed."
pub struct UsageRepo;

impl UsageRepo {
    /// Collect every set item referencing the track across the owner's sets,
    /// joined to the owning set and (left) its gig.
    ///
    /// Ordering is not invariant-bearing but must be deterministic for a
    /// given snapshot: set id ascending, then position ascending. The
    /// last-played date is derived by the caller as a pure reduction over
    /// these rows, independent of this order.
    pub async fn list_for_track(
        pool: &PgPool,
        user_id: DbId,
        track_id: DbId,
    ) -> Result<Vec<TrackUsageRow>, sqlx::Error> {
        sqlx::query_as::<_, TrackUsageRow>(
            "SELECT si.id AS set_item_id, s.id AS set_id, s.name AS set_name, si.position, \
                    g.id AS gig_id, g.title AS gig_title, g.venue AS gig_venue, \
                    g.gig_date, g.notes AS gig_notes \
             FROM set_items si \
             JOIN sets s ON s.id = si.set_id \
             LEFT JOIN gigs g ON g.id = s.gig_id \
             WHERE si.track_id = $1 AND s.user_id = $2 \
             ORDER BY s.id ASC, si.position ASC",
        )
        .bind(track_id)
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
