//! Repository for the `sets` table.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::set::{CreateSet, Set, UpdateSet};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, gig_id, name, notes, created_at";

/// Provides CRUD operations for sets. Item composition lives in
/// [`crate::repositories::SetItemRepo`].
pub struct SetRepo;

impl SetRepo {
    /// Insert a new set, returning the created row.
    ///
    /// Gig ownership must be verified by the caller before linking.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSet,
    ) -> Result<Set, sqlx::Error> {
        let query = format!(
            "INSERT INTO sets (user_id, gig_id, name, notes) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Set>(&query)
            .bind(user_id)
            .bind(input.gig_id)
            .bind(&input.name)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a set by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Set>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sets WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Set>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's sets, newest first.
    pub async fn list(pool: &PgPool, user_id: DbId) -> Result<Vec<Set>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sets WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Set>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a set. Absent fields are left unchanged; an explicit `null`
    /// for `gig_id` unlinks the gig, and for `notes` clears them.
    ///
    /// Returns `None` if no owned row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateSet,
    ) -> Result<Option<Set>, sqlx::Error> {
        let query = format!(
            "UPDATE sets SET \
                name = COALESCE($3, name), \
                gig_id = CASE WHEN $4 THEN $5 ELSE gig_id END, \
                notes = CASE WHEN $6 THEN $7 ELSE notes END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Set>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(input.gig_id.is_some())
            .bind(input.gig_id.flatten())
            .bind(input.notes.is_some())
            .bind(input.notes.clone().flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a set. Its items are removed by the cascading foreign key.
    ///
    /// Returns `false` if no owned row with the given `id` exists.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sets WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
