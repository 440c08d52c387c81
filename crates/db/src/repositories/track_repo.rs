//! Repository for the `tracks` table.
//!
//! Every method is scoped by `user_id`; a track owned by another account
//! behaves exactly like a missing one.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::track::{CreateTrack, Track, UpdateTrack};
use crate::repositories::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, artist, bpm, musical_key, energy, notes, created_at";

/// Provides CRUD operations for tracks.
pub struct TrackRepo;

impl TrackRepo {
    /// Insert a new track, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTrack,
    ) -> Result<Track, sqlx::Error> {
        let query = format!(
            "INSERT INTO tracks (user_id, title, artist, bpm, musical_key, energy, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.bpm)
            .bind(&input.musical_key)
            .bind(&input.energy)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a track by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tracks WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's tracks, newest first, with optional case-insensitive
    /// substring search over title, artist, and energy.
    ///
    /// Returns the page of rows plus the total match count for pagination.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        q: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<(Vec<Track>, i64), sqlx::Error> {
        let pattern = q
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{q}%"));

        let query = format!(
            "SELECT {COLUMNS} FROM tracks \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR title ILIKE $2 OR artist ILIKE $2 OR energy ILIKE $2) \
             ORDER BY id DESC \
             LIMIT $3 OFFSET $4"
        );
        let tracks = sqlx::query_as::<_, Track>(&query)
            .bind(user_id)
            .bind(&pattern)
            .bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM tracks \
             WHERE user_id = $1 \
               AND ($2::text IS NULL OR title ILIKE $2 OR artist ILIKE $2 OR energy ILIKE $2)",
        )
        .bind(user_id)
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((tracks, total))
    }

    /// Update a track. Absent fields are left unchanged; for the nullable
    /// columns an explicit `null` clears the stored value, which COALESCE
    /// cannot express, hence the flag + CASE pairs.
    ///
    /// Returns `None` if no owned row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateTrack,
    ) -> Result<Option<Track>, sqlx::Error> {
        let query = format!(
            "UPDATE tracks SET \
                title = COALESCE($3, title), \
                artist = COALESCE($4, artist), \
                bpm = CASE WHEN $5 THEN $6 ELSE bpm END, \
                musical_key = CASE WHEN $7 THEN $8 ELSE musical_key END, \
                energy = CASE WHEN $9 THEN $10 ELSE energy END, \
                notes = CASE WHEN $11 THEN $12 ELSE notes END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Track>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.artist)
            .bind(input.bpm.is_some())
            .bind(input.bpm.flatten())
            .bind(input.musical_key.is_some())
            .bind(input.musical_key.clone().flatten())
            .bind(input.energy.is_some())
            .bind(input.energy.clone().flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a track together with any set items referencing it.
    ///
    /// Removing items punches holes in their sets' position sequences, so the
    /// affected sets are renumbered in the same transaction to restore dense
    /// zero-based positions.
    ///
    /// Returns `false` if no owned track with the given `id` exists.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock the track row first so concurrent deletes serialize.
        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM tracks WHERE id = $1 AND user_id = $2 FOR UPDATE")
                .bind(id)
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let affected_sets: Vec<(DbId,)> = sqlx::query_as(
            "DELETE FROM set_items si USING sets s \
             WHERE si.track_id = $1 AND si.set_id = s.id AND s.user_id = $2 \
             RETURNING si.set_id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_all(&mut *tx)
        .await?;

        if !affected_sets.is_empty() {
            let set_ids: Vec<DbId> = affected_sets.into_iter().map(|(set_id,)| set_id).collect();
            sqlx::query(
                "UPDATE set_items si SET position = r.new_position \
                 FROM (SELECT id, \
                              ROW_NUMBER() OVER (PARTITION BY set_id ORDER BY position) - 1 \
                                  AS new_position \
                         FROM set_items WHERE set_id = ANY($1)) r \
                 WHERE si.id = r.id AND si.position <> r.new_position",
            )
            .bind(&set_ids)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM tracks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
