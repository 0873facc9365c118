//! Route definitions for recipes and their comment threads.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comments, recipes};
use crate::state::AppState;

/// Recipe routes, nested under `/recipes`.
///
/// ```text
/// GET    /                                 list_recipes
/// POST   /                                 create_recipe
/// GET    /{id}                             get_recipe
/// PUT    /{id}                             update_recipe
/// DELETE /{id}                             delete_recipe
/// GET    /{id}/comments                    list_comments
/// POST   /{id}/comments                    create_comment
/// GET    /{id}/comments/{comment_id}       get_comment
/// ```
pub fn recipes_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/{id}",
            get(recipes::get_recipe)
                .put(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/{id}/comments/{comment_id}", get(comments::get_comment))
}
