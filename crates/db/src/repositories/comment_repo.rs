//! Repository for the `comments` table.

use recipeshare_core::comments::AcceptedComment;
use recipeshare_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::comment::Comment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, recipe_id, user_id, user_name, content, rating, parent_id, created_at";

/// Provides insert and query operations for comments (append-only).
pub struct CommentRepo;

impl CommentRepo {
    /// Insert a validated comment, returning the created row.
    ///
    /// Takes a generic executor so the insert can share a transaction with
    /// the rating aggregate write.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        recipe_id: DbId,
        comment: &AcceptedComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (recipe_id, user_id, user_name, content, rating, parent_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(recipe_id)
            .bind(comment.user_id)
            .bind(&comment.user_name)
            .bind(&comment.content)
            .bind(comment.rating)
            .bind(comment.parent_id)
            .fetch_one(executor)
            .await
    }

    /// List all comments for a recipe in creation order, the ordering the
    /// display grouping relies on.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE recipe_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Find a comment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
