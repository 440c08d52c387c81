//! Repository for the `gigs` table.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::gig::{CreateGig, Gig, UpdateGig};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, venue, gig_date, notes, created_at";

/// Provides CRUD operations for gigs.
pub struct GigRepo;

impl GigRepo {
    /// Insert a new gig, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateGig,
    ) -> Result<Gig, sqlx::Error> {
        let query = format!(
            "INSERT INTO gigs (user_id, title, venue, gig_date, notes) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gig>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.venue)
            .bind(input.gig_date)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a gig by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Gig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gigs WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Gig>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's gigs, most recent date first (undated gigs last).
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Gig>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM gigs WHERE user_id = $1 \
             ORDER BY gig_date DESC NULLS LAST, id DESC"
        );
        sqlx::query_as::<_, Gig>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a gig. Absent fields are left unchanged; an explicit `null`
    /// clears the nullable columns (venue, gig_date, notes).
    ///
    /// Returns `None` if no owned row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateGig,
    ) -> Result<Option<Gig>, sqlx::Error> {
        let query = format!(
            "UPDATE gigs SET \
                title = COALESCE($3, title), \
                venue = CASE WHEN $4 THEN $5 ELSE venue END, \
                gig_date = CASE WHEN $6 THEN $7 ELSE gig_date END, \
                notes = CASE WHEN $8 THEN $9 ELSE notes END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gig>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.title)
            .bind(input.venue.is_some())
            .bind(input.venue.clone().flatten())
            .bind(input.gig_date.is_some())
            .bind(input.gig_date.flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a gig. Sets linked to it are unlinked by the `ON DELETE SET
    /// NULL` foreign key, not deleted.
    ///
    /// Returns `false` if no owned row with the given `id` exists.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gigs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
