//! Recipe entity model and DTOs.

use recipeshare_core::comments::RatingAggregate;
use recipeshare_core::recipe::{Ingredient, Step};
use recipeshare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A recipe row from the `recipes` table.
///
/// `author_name` is denormalized at creation time. `average_rating` and
/// `total_ratings` are the cached aggregate advanced incrementally by the
/// comment submission path; they are never recomputed from the comment set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub ingredients: Json<Vec<Ingredient>>,
    pub steps: Json<Vec<Step>>,
    pub author_id: DbId,
    pub author_name: String,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Recipe {
    /// The recipe's current cached rating aggregate.
    pub fn rating_aggregate(&self) -> RatingAggregate {
        RatingAggregate {
            average_rating: self.average_rating,
            total_ratings: self.total_ratings,
        }
    }
}

/// DTO for creating a new recipe. Author identity comes from the
/// authenticated request, never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipe {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

/// DTO for updating an existing recipe. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub steps: Option<Vec<Step>>,
}
