//! Comment threading and rating aggregation for recipe detail views.
//!
//! Comments are stored flat and append-only. A comment with a `parent_id`
//! is a reply and never carries a rating; a top-level comment may carry an
//! optional 1-5 star rating. The recipe row caches `(average_rating,
//! total_ratings)` and this module is the single place that pair is
//! advanced: an incremental weighted update per qualifying submission,
//! never a recomputation over the comment history.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Maximum length for a comment's text content.
pub const MAX_COMMENT_LENGTH: usize = 10_000;

/* --------------------------------------------------------------------------
Types
-------------------------------------------------------------------------- */

/// Cached rating aggregate stored on a recipe row.
///
/// `average_rating` is the arithmetic mean of every rating ever submitted
/// with a top-level comment; `total_ratings` is their count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingAggregate {
    pub average_rating: f64,
    pub total_ratings: i64,
}

impl RatingAggregate {
    /// The aggregate of a recipe nobody has rated yet.
    pub fn zero() -> Self {
        Self {
            average_rating: 0.0,
            total_ratings: 0,
        }
    }
}

/// Identity of the submitting user, passed in explicitly by the caller.
///
/// The display name is denormalized onto the stored comment at creation
/// time; a later rename does not rewrite history.
#[derive(Debug, Clone)]
pub struct CommentAuthor {
    pub id: DbId,
    pub display_name: String,
}

/// A raw comment submission as it arrives from the comment form.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentSubmission {
    pub content: String,
    pub rating: Option<i32>,
    pub parent_id: Option<DbId>,
}

/// A validated submission ready to be persisted as a comment row.
#[derive(Debug, Clone)]
pub struct AcceptedComment {
    pub user_id: DbId,
    pub user_name: String,
    pub content: String,
    pub rating: Option<i32>,
    pub parent_id: Option<DbId>,
}

/// Anything that can be placed in a two-level comment thread.
pub trait ThreadItem {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

/// A flat comment collection grouped for display.
///
/// `top_level` preserves the input order of comments without a parent.
/// `replies_by_parent` groups every reply under its parent id, preserving
/// relative input order within each group. Replies-to-replies are not
/// nested further; a reply always files under a top-level comment id.
#[derive(Debug, Serialize)]
pub struct CommentThread<T> {
    pub top_level: Vec<T>,
    pub replies_by_parent: HashMap<DbId, Vec<T>>,
}

/* --------------------------------------------------------------------------
Grouping
-------------------------------------------------------------------------- */

/// Partition a flat comment collection into a two-level display structure.
///
/// Pure and total: every input comment lands in exactly one partition, and
/// empty input yields empty output. Callers wanting chronological display
/// must supply the comments pre-sorted by creation time; no re-sorting
/// happens here. A reply whose parent id matches no top-level comment ends
/// up in a group that is simply never rendered (orphan tolerance).
pub fn group_for_display<T: ThreadItem>(comments: Vec<T>) -> CommentThread<T> {
    let mut top_level = Vec::new();
    let mut replies_by_parent: HashMap<DbId, Vec<T>> = HashMap::new();

    for comment in comments {
        match comment.parent_id() {
            Some(parent_id) => replies_by_parent.entry(parent_id).or_default().push(comment),
            None => top_level.push(comment),
        }
    }

    CommentThread {
        top_level,
        replies_by_parent,
    }
}

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a star rating is within the accepted 1-5 range.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating {rating} is out of range. Must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

/// Validate comment content: non-empty after trimming, within the length cap.
pub fn validate_comment_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    if content.len() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Submission
-------------------------------------------------------------------------- */

/// Validate a comment submission and compute the resulting aggregate.
///
/// Returns the accepted comment (content trimmed, author name snapshotted)
/// together with the new rating aggregate when the submission qualifies:
/// a top-level comment carrying a rating. Replies and unrated top-level
/// comments leave the aggregate untouched and return `None`.
///
/// The update is an incremental weighted mean over the caller-supplied
/// `current` snapshot:
///
/// ```text
/// new_average = (average * total + rating) / (total + 1)
/// new_total   = total + 1
/// ```
///
/// The snapshot read makes concurrent raters race (last write wins); see
/// the checked aggregate write in the repository layer for the variant
/// that detects the conflict instead.
///
/// No side effects: either a complete `(comment, aggregate)` pair comes
/// back or the submission is rejected before producing any output.
pub fn submit(
    current: &RatingAggregate,
    submission: CommentSubmission,
    author: &CommentAuthor,
) -> Result<(AcceptedComment, Option<RatingAggregate>), CoreError> {
    validate_comment_content(&submission.content)?;

    if submission.parent_id.is_some() && submission.rating.is_some() {
        return Err(CoreError::Validation(
            "A reply cannot carry a rating".to_string(),
        ));
    }

    if let Some(rating) = submission.rating {
        validate_rating(rating)?;
    }

    let comment = AcceptedComment {
        user_id: author.id,
        user_name: author.display_name.clone(),
        content: submission.content.trim().to_string(),
        rating: submission.rating,
        parent_id: submission.parent_id,
    };

    let new_aggregate = match (submission.parent_id, submission.rating) {
        (None, Some(rating)) => Some(RatingAggregate {
            average_rating: (current.average_rating * current.total_ratings as f64
                + f64::from(rating))
                / (current.total_ratings + 1) as f64,
            total_ratings: current.total_ratings + 1,
        }),
        _ => None,
    };

    Ok((comment, new_aggregate))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
