//! Handlers for recipe comment threads and comment submission.
//!
//! Submission runs the pure aggregation logic in `recipeshare_core` against
//! a snapshot of the recipe's cached rating aggregate, then persists the
//! comment and (when the submission carried a qualifying rating) the new
//! aggregate in a single transaction.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use recipeshare_core::comments::{
    group_for_display, submit, CommentAuthor, CommentSubmission, RatingAggregate,
};
use recipeshare_core::error::CoreError;
use recipeshare_core::types::DbId;
use recipeshare_db::models::comment::Comment;
use recipeshare_db::repositories::{CommentRepo, RecipeRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::recipes::fetch_recipe;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// How many times a strict-mode submission re-reads and retries when a
/// concurrent rating invalidates its snapshot.
const MAX_AGGREGATE_ATTEMPTS: u32 = 3;

/// GET /recipes/{id}/comments
///
/// The recipe's comment thread: top-level comments in creation order plus
/// replies grouped under their parent ids. Public.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    // 404 for a missing recipe rather than an empty thread.
    fetch_recipe(&state.pool, recipe_id).await?;

    let comments = CommentRepo::list_for_recipe(&state.pool, recipe_id).await?;
    let thread = group_for_display(comments);

    Ok(Json(DataResponse { data: thread }))
}

/// POST /recipes/{id}/comments
///
/// Submit a comment, optionally rated (top-level only). A validation
/// failure persists nothing and leaves the displayed aggregate untouched.
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(recipe_id): Path<DbId>,
    Json(input): Json<CommentSubmission>,
) -> AppResult<impl IntoResponse> {
    let author = CommentAuthor {
        id: auth.user_id,
        display_name: auth.display_name.clone(),
    };

    let mut attempts = 0;
    loop {
        attempts += 1;

        // Snapshot the current aggregate, validate, and compute the result.
        let recipe = fetch_recipe(&state.pool, recipe_id).await?;
        let (accepted, new_aggregate) =
            submit(&recipe.rating_aggregate(), input.clone(), &author).map_err(AppError::Core)?;

        let Some(aggregate) = new_aggregate else {
            // Replies and unrated comments never touch the aggregate.
            let comment = CommentRepo::create(&state.pool, recipe_id, &accepted).await?;
            tracing::info!(
                user_id = auth.user_id,
                recipe_id = recipe_id,
                comment_id = comment.id,
                "Comment created"
            );
            return Ok((StatusCode::CREATED, Json(DataResponse { data: comment })));
        };

        // Persist the comment and the aggregate as one logical update.
        let mut tx = state.pool.begin().await?;
        let comment = CommentRepo::create(&mut *tx, recipe_id, &accepted).await?;

        let applied = if state.config.strict_rating_updates {
            RecipeRepo::store_rating_aggregate_checked(
                &mut *tx,
                recipe_id,
                recipe.total_ratings,
                &aggregate,
            )
            .await?
        } else {
            // Snapshot-based write: faithful to the original application,
            // last write wins under concurrent raters.
            RecipeRepo::store_rating_aggregate(&mut *tx, recipe_id, &aggregate).await?;
            true
        };

        if applied {
            tx.commit().await?;
            log_rating_applied(&auth, recipe_id, comment.id, &aggregate);
            return Ok((StatusCode::CREATED, Json(DataResponse { data: comment })));
        }

        // A concurrent rating moved the aggregate under us. Roll back and
        // recompute from a fresh snapshot.
        drop(tx);

        if attempts >= MAX_AGGREGATE_ATTEMPTS {
            return Err(AppError::Core(CoreError::StaleAggregate(format!(
                "Rating aggregate for recipe {recipe_id} kept moving after {attempts} attempts"
            ))));
        }

        tracing::debug!(
            recipe_id = recipe_id,
            attempt = attempts,
            "Stale rating aggregate, retrying"
        );
    }
}

fn log_rating_applied(
    auth: &AuthUser,
    recipe_id: DbId,
    comment_id: DbId,
    aggregate: &RatingAggregate,
) {
    tracing::info!(
        user_id = auth.user_id,
        recipe_id = recipe_id,
        comment_id = comment_id,
        average_rating = aggregate.average_rating,
        total_ratings = aggregate.total_ratings,
        "Rated comment created"
    );
}

/// GET /recipes/{id}/comments/{comment_id}
///
/// Fetch a single comment (used by clients to refresh one thread entry).
pub async fn get_comment(
    State(state): State<AppState>,
    Path((recipe_id, comment_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let comment = CommentRepo::find_by_id(&state.pool, comment_id)
        .await?
        .filter(|c: &Comment| c.recipe_id == recipe_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    Ok(Json(DataResponse { data: comment }))
}
