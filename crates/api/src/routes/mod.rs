pub mod health;
pub mod recipes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /recipes                              feed (GET), publish (POST, auth)
/// /recipes/{id}                         detail (GET), edit (PUT, author),
///                                       delete (DELETE, author)
/// /recipes/{id}/comments                thread (GET), submit (POST, auth)
/// /recipes/{id}/comments/{comment_id}   single comment (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/recipes", recipes::recipes_router())
}
