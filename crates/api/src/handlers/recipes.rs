//! Handlers for the recipe feed and recipe CRUD.
//!
//! Reading is public; creating requires an authenticated identity, and
//! editing or deleting a recipe is restricted to its author. Deleting a
//! recipe cascades to its comments at the database layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use recipeshare_core::error::CoreError;
use recipeshare_core::recipe::{
    validate_description, validate_ingredients, validate_steps, validate_title,
};
use recipeshare_core::types::DbId;
use recipeshare_db::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};
use recipeshare_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a recipe or fail with 404.
pub async fn fetch_recipe(pool: &sqlx::PgPool, id: DbId) -> AppResult<Recipe> {
    RecipeRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))
}

/// Only the author may mutate a recipe.
fn ensure_author(recipe: &Recipe, user_id: DbId) -> AppResult<()> {
    if recipe.author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Only the recipe's author can modify it".into(),
        )))
    }
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /recipes
///
/// The recipe feed, newest first. Public.
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let recipes = RecipeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: recipes }))
}

/// GET /recipes/{id}
///
/// Recipe detail. Public.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = fetch_recipe(&state.pool, id).await?;
    Ok(Json(DataResponse { data: recipe }))
}

/// POST /recipes
///
/// Publish a new recipe. The author identity comes from the token, and the
/// author's display name is snapshotted onto the row.
pub async fn create_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRecipe>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::Core)?;
    validate_description(&input.description).map_err(AppError::Core)?;
    validate_ingredients(&input.ingredients).map_err(AppError::Core)?;
    validate_steps(&input.steps).map_err(AppError::Core)?;

    let recipe =
        RecipeRepo::create(&state.pool, auth.user_id, &auth.display_name, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        recipe_id = recipe.id,
        title = %recipe.title,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: recipe })))
}

/// PUT /recipes/{id}
///
/// Edit a recipe (author only). Rating aggregate fields are untouchable
/// through this path.
pub async fn update_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRecipe>,
) -> AppResult<impl IntoResponse> {
    let recipe = fetch_recipe(&state.pool, id).await?;
    ensure_author(&recipe, auth.user_id)?;

    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::Core)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description).map_err(AppError::Core)?;
    }
    if let Some(ref ingredients) = input.ingredients {
        validate_ingredients(ingredients).map_err(AppError::Core)?;
    }
    if let Some(ref steps) = input.steps {
        validate_steps(steps).map_err(AppError::Core)?;
    }

    let recipe = RecipeRepo::update(&state.pool, id, &input).await?;

    tracing::info!(user_id = auth.user_id, recipe_id = id, "Recipe updated");

    Ok(Json(DataResponse { data: recipe }))
}

/// DELETE /recipes/{id}
///
/// Delete a recipe (author only). Comments cascade.
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = fetch_recipe(&state.pool, id).await?;
    ensure_author(&recipe, auth.user_id)?;

    RecipeRepo::delete(&state.pool, id).await?;

    tracing::info!(user_id = auth.user_id, recipe_id = id, "Recipe deleted");

    Ok(StatusCode::NO_CONTENT)
}
