//! Repository for the `set_items` table -- the set composition engine.
//!
//! Invariant: within a set, positions are always exactly `{0..n-1}`. Every
//! mutation here is a single atomic transaction; the deferred unique
//! constraint `uq_set_items_position` re-checks density at commit, so a
//! failure mid-write can never persist a gapped or duplicated sequence.
//!
//! Set ownership is the caller's responsibility: handlers resolve the set
//! through `SetRepo::find_by_id` (user-scoped) before touching its items.

use setlist_core::ordering::validate_permutation;
use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::set_item::{ReorderOutcome, SetItem, SetItemWithTrack, UpdateSetItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, set_id, track_id, position, notes";

/// Maintains the ordered list of items inside a set.
pub struct SetItemRepo;

impl SetItemRepo {
    /// Append a track to the end of a set: the new item's position is the
    /// current item count, computed inside the INSERT itself so the
    /// operation is atomic.
    pub async fn append(
        pool: &PgPool,
        set_id: DbId,
        track_id: DbId,
        notes: Option<&str>,
    ) -> Result<SetItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO set_items (set_id, track_id, position, notes) \
             VALUES ($1, $2, (SELECT COUNT(*) FROM set_items WHERE set_id = $1), $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetItem>(&query)
            .bind(set_id)
            .bind(track_id)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    /// Find an item within a specific set.
    pub async fn find_in_set(
        pool: &PgPool,
        set_id: DbId,
        item_id: DbId,
    ) -> Result<Option<SetItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM set_items WHERE id = $1 AND set_id = $2");
        sqlx::query_as::<_, SetItem>(&query)
            .bind(item_id)
            .bind(set_id)
            .fetch_optional(pool)
            .await
    }

    /// List a set's items in running order, each joined with its track.
    pub async fn list_for_set(
        pool: &PgPool,
        set_id: DbId,
    ) -> Result<Vec<SetItemWithTrack>, sqlx::Error> {
        sqlx::query_as::<_, SetItemWithTrack>(
            "SELECT si.id, si.set_id, si.track_id, si.position, si.notes, \
                    t.title AS track_title, t.artist AS track_artist, t.bpm AS track_bpm, \
                    t.musical_key AS track_musical_key, t.energy AS track_energy \
             FROM set_items si \
             JOIN tracks t ON t.id = si.track_id \
             WHERE si.set_id = $1 \
             ORDER BY si.position ASC",
        )
        .bind(set_id)
        .fetch_all(pool)
        .await
    }

    /// Update an item's notes: absent leaves them unchanged, an explicit
    /// `null` clears them. Position is not editable; positions are only
    /// rewritten in bulk by [`Self::reorder`].
    pub async fn update_notes(
        pool: &PgPool,
        set_id: DbId,
        item_id: DbId,
        input: &UpdateSetItem,
    ) -> Result<Option<SetItem>, sqlx::Error> {
        let query = format!(
            "UPDATE set_items SET notes = CASE WHEN $3 THEN $4 ELSE notes END \
             WHERE id = $1 AND set_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetItem>(&query)
            .bind(item_id)
            .bind(set_id)
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Remove an item and close the gap: every item whose position was
    /// greater than the removed one shifts down by one, preserving relative
    /// order. Delete and compaction commit together.
    ///
    /// Returns `false` if the item does not exist in that set.
    pub async fn remove(
        pool: &PgPool,
        set_id: DbId,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let removed: Option<(i32,)> = sqlx::query_as(
            "DELETE FROM set_items WHERE id = $1 AND set_id = $2 RETURNING position",
        )
        .bind(item_id)
        .bind(set_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((position,)) = removed else {
            // Nothing deleted; dropping the transaction rolls back.
            return Ok(false);
        };

        sqlx::query(
            "UPDATE set_items SET position = position - 1 \
             WHERE set_id = $1 AND position > $2",
        )
        .bind(set_id)
        .bind(position)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Rewrite every item's position to its zero-based index in `order`,
    /// all-or-nothing.
    ///
    /// The current item ids are read under `FOR UPDATE` and the permutation
    /// check runs against that locked snapshot, so a racing append/remove
    /// cannot invalidate an already-checked order mid-write. A rejected
    /// order leaves the set completely untouched.
    ///
    /// No version token exists on sets or items: concurrent reorders are
    /// last-write-wins, and the losing caller still sees success.
    pub async fn reorder(
        pool: &PgPool,
        set_id: DbId,
        order: &[DbId],
    ) -> Result<ReorderOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current_rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM set_items WHERE set_id = $1 ORDER BY position FOR UPDATE",
        )
        .bind(set_id)
        .fetch_all(&mut *tx)
        .await?;
        let current: Vec<DbId> = current_rows.into_iter().map(|(id,)| id).collect();

        if let Err(violation) = validate_permutation(&current, order) {
            tx.rollback().await?;
            return Ok(ReorderOutcome::Rejected(violation));
        }

        // WITH ORDINALITY indexes from 1; the deferred unique constraint
        // verifies the resulting density at commit.
        sqlx::query(
            "UPDATE set_items si SET position = ord.idx - 1 \
             FROM unnest($2::bigint[]) WITH ORDINALITY AS ord(item_id, idx) \
             WHERE si.id = ord.item_id AND si.set_id = $1",
        )
        .bind(set_id)
        .bind(order)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ReorderOutcome::Applied)
    }
}
