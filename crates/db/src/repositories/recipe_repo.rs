//! Repository for the `recipes` table.

use recipeshare_core::comments::RatingAggregate;
use recipeshare_core::types::DbId;
use sqlx::types::Json;
use sqlx::{PgExecutor, PgPool};

use crate::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, ingredients, steps, author_id, \
    author_name, average_rating, total_ratings, created_at, updated_at";

/// Provides CRUD operations and the rating-aggregate write seam for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a new recipe, returning the created row.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        author_name: &str,
        input: &CreateRecipe,
    ) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes (title, description, ingredients, steps, author_id, author_name)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(Json(&input.ingredients))
            .bind(Json(&input.steps))
            .bind(author_id)
            .bind(author_name)
            .fetch_one(pool)
            .await
    }

    /// Find a recipe by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all recipes for the feed, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Recipe>(&query).fetch_all(pool).await
    }

    /// Update a recipe's content fields, stamping `updated_at`.
    ///
    /// Rating aggregate fields are deliberately not touchable here; they
    /// only move through the aggregate write methods below.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRecipe,
    ) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                ingredients = COALESCE($3, ingredients),
                steps = COALESCE($4, steps),
                updated_at = now()
             WHERE id = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.ingredients.as_ref().map(Json))
            .bind(input.steps.as_ref().map(Json))
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Delete a recipe. Its comments cascade via the `recipe_id` FK.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Write a caller-computed rating aggregate unconditionally.
    ///
    /// This is the snapshot-based path: concurrent raters working from
    /// stale snapshots race and the last write wins.
    pub async fn store_rating_aggregate(
        executor: impl PgExecutor<'_>,
        id: DbId,
        aggregate: &RatingAggregate,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE recipes SET average_rating = $1, total_ratings = $2 WHERE id = $3")
            .bind(aggregate.average_rating)
            .bind(aggregate.total_ratings)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Compare-and-set variant of the aggregate write.
    ///
    /// The update only applies while `total_ratings` still matches the
    /// snapshot the caller computed from (every rating increments the
    /// count, so it doubles as a version counter). Returns `false` when a
    /// concurrent rating got there first; the caller should re-read the
    /// recipe, recompute, and retry.
    pub async fn store_rating_aggregate_checked(
        executor: impl PgExecutor<'_>,
        id: DbId,
        expected_total: i64,
        aggregate: &RatingAggregate,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE recipes SET average_rating = $1, total_ratings = $2
             WHERE id = $3 AND total_ratings = $4",
        )
        .bind(aggregate.average_rating)
        .bind(aggregate.total_ratings)
        .bind(id)
        .bind(expected_total)
        .execute(executor)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
