//! Recipe field types and validation functions.
//!
//! Used by the API layer before anything reaches the database. The author
//! name is denormalized onto the recipe at creation time, mirroring what
//! comments do with the commenter's name.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Maximum length for a recipe title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for a recipe description.
pub const MAX_DESCRIPTION_LENGTH: usize = 5_000;

/// Maximum length for a single preparation step.
pub const MAX_STEP_LENGTH: usize = 2_000;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// One ingredient line: name plus free-form amount and unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

/// One preparation step, numbered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub number: i32,
    pub content: String,
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate a recipe title: non-empty after trimming, within the length cap.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation(
            "Recipe title must not be empty".to_string(),
        ));
    }
    if title.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Recipe title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a recipe description. Empty is allowed; overlong is not.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Recipe description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the ingredient list: at least one entry, each with a name.
pub fn validate_ingredients(ingredients: &[Ingredient]) -> Result<(), CoreError> {
    if ingredients.is_empty() {
        return Err(CoreError::Validation(
            "A recipe needs at least one ingredient".to_string(),
        ));
    }
    for (i, ingredient) in ingredients.iter().enumerate() {
        if ingredient.name.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Ingredient {} has no name",
                i + 1
            )));
        }
    }
    Ok(())
}

/// Validate the step list: at least one entry, each with content.
pub fn validate_steps(steps: &[Step]) -> Result<(), CoreError> {
    if steps.is_empty() {
        return Err(CoreError::Validation(
            "A recipe needs at least one step".to_string(),
        ));
    }
    for (i, step) in steps.iter().enumerate() {
        if step.content.trim().is_empty() {
            return Err(CoreError::Validation(format!("Step {} is empty", i + 1)));
        }
        if step.content.len() > MAX_STEP_LENGTH {
            return Err(CoreError::Validation(format!(
                "Step {} exceeds maximum length of {MAX_STEP_LENGTH} characters",
                i + 1
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
