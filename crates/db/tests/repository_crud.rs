//! Integration tests for the repository layer against a real database:
//! - Recipe CRUD and feed ordering
//! - Comment insertion and chronological listing
//! - The two rating-aggregate write paths (snapshot and compare-and-set)

use recipeshare_core::comments::{AcceptedComment, RatingAggregate};
use recipeshare_core::recipe::{Ingredient, Step};
use recipeshare_db::models::recipe::{CreateRecipe, UpdateRecipe};
use recipeshare_db::repositories::{CommentRepo, RecipeRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_recipe(title: &str) -> CreateRecipe {
    CreateRecipe {
        title: title.to_string(),
        description: "Test recipe".to_string(),
        ingredients: vec![Ingredient {
            name: "flour".to_string(),
            amount: "500".to_string(),
            unit: "g".to_string(),
        }],
        steps: vec![Step {
            number: 1,
            content: "Mix.".to_string(),
        }],
    }
}

fn new_comment(content: &str, rating: Option<i32>, parent_id: Option<i64>) -> AcceptedComment {
    AcceptedComment {
        user_id: 7,
        user_name: "Alice".to_string(),
        content: content.to_string(),
        rating,
        parent_id,
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bootstrap(pool: PgPool) {
    recipeshare_db::health_check(&pool).await.unwrap();

    for table in ["recipes", "comments"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0);
    }
}

// ---------------------------------------------------------------------------
// Recipe CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_recipe_crud_roundtrip(pool: PgPool) {
    let created = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Bread"))
        .await
        .unwrap();
    assert_eq!(created.title, "Bread");
    assert_eq!(created.author_id, 7);
    assert_eq!(created.author_name, "Alice");
    assert_eq!(created.total_ratings, 0);
    assert_eq!(created.average_rating, 0.0);
    assert!(created.updated_at.is_none());

    let found = RecipeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("recipe should exist");
    assert_eq!(found.ingredients.0[0].name, "flour");

    let updated = RecipeRepo::update(
        &pool,
        created.id,
        &UpdateRecipe {
            title: Some("Sourdough".to_string()),
            description: None,
            ingredients: None,
            steps: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Sourdough");
    assert_eq!(updated.description, "Test recipe");
    assert!(updated.updated_at.is_some());

    RecipeRepo::delete(&pool, created.id).await.unwrap();
    assert!(RecipeRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feed_orders_newest_first(pool: PgPool) {
    let a = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Older"))
        .await
        .unwrap();
    let b = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Newer"))
        .await
        .unwrap();

    let feed = RecipeRepo::list(&pool).await.unwrap();
    let ids: Vec<i64> = feed.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comments_list_chronologically(pool: PgPool) {
    let recipe = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Stew"))
        .await
        .unwrap();

    let first = CommentRepo::create(&pool, recipe.id, &new_comment("First", Some(4), None))
        .await
        .unwrap();
    CommentRepo::create(&pool, recipe.id, &new_comment("Second", None, None))
        .await
        .unwrap();
    CommentRepo::create(&pool, recipe.id, &new_comment("A reply", None, Some(first.id)))
        .await
        .unwrap();

    let comments = CommentRepo::list_for_recipe(&pool, recipe.id).await.unwrap();
    let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
    assert_eq!(contents, vec!["First", "Second", "A reply"]);
    assert_eq!(comments[2].parent_id, Some(first.id));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rated_reply_rejected_by_schema(pool: PgPool) {
    let recipe = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Pie"))
        .await
        .unwrap();
    let parent = CommentRepo::create(&pool, recipe.id, &new_comment("Parent", None, None))
        .await
        .unwrap();

    // The submission path rejects this first; the table CHECK is the
    // backstop for any other writer.
    let result = CommentRepo::create(
        &pool,
        recipe.id,
        &new_comment("Sneaky", Some(5), Some(parent.id)),
    )
    .await;
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_recipe_cascades_comments(pool: PgPool) {
    let recipe = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Tart"))
        .await
        .unwrap();
    CommentRepo::create(&pool, recipe.id, &new_comment("Nice", None, None))
        .await
        .unwrap();

    RecipeRepo::delete(&pool, recipe.id).await.unwrap();

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}

// ---------------------------------------------------------------------------
// Rating aggregate writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_snapshot_aggregate_write(pool: PgPool) {
    let recipe = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Curry"))
        .await
        .unwrap();

    let aggregate = RatingAggregate {
        average_rating: 4.5,
        total_ratings: 2,
    };
    RecipeRepo::store_rating_aggregate(&pool, recipe.id, &aggregate)
        .await
        .unwrap();

    let stored = RecipeRepo::find_by_id(&pool, recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.rating_aggregate(), aggregate);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_checked_aggregate_write_detects_stale_snapshot(pool: PgPool) {
    let recipe = RecipeRepo::create(&pool, 7, "Alice", &new_recipe("Ramen"))
        .await
        .unwrap();

    // Writing against the live count succeeds.
    let first = RatingAggregate {
        average_rating: 5.0,
        total_ratings: 1,
    };
    let applied = RecipeRepo::store_rating_aggregate_checked(&pool, recipe.id, 0, &first)
        .await
        .unwrap();
    assert!(applied);

    // A second writer still holding the count-0 snapshot loses.
    let stale = RatingAggregate {
        average_rating: 3.0,
        total_ratings: 1,
    };
    let applied = RecipeRepo::store_rating_aggregate_checked(&pool, recipe.id, 0, &stale)
        .await
        .unwrap();
    assert!(!applied);

    // Recomputing from a fresh snapshot succeeds.
    let retried = RatingAggregate {
        average_rating: 4.0,
        total_ratings: 2,
    };
    let applied = RecipeRepo::store_rating_aggregate_checked(&pool, recipe.id, 1, &retried)
        .await
        .unwrap();
    assert!(applied);

    let stored = RecipeRepo::find_by_id(&pool, recipe.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.rating_aggregate(), retried);
}
