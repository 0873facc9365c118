//! Comment entity model.
//!
//! Comments are append-only: there is no update DTO. The insert data comes
//! from `recipeshare_core::comments::AcceptedComment`, the validated output
//! of the submission path.

use recipeshare_core::comments::ThreadItem;
use recipeshare_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A comment row from the `comments` table.
///
/// `user_name` is the commenter's display name as it was when the comment
/// was posted. A `parent_id` marks the row as a reply; replies never carry
/// a rating (enforced at submit time and by a table CHECK).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub recipe_id: DbId,
    pub user_id: DbId,
    pub user_name: String,
    pub content: String,
    pub rating: Option<i32>,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl ThreadItem for Comment {
    fn id(&self) -> DbId {
        self.id
    }

    fn parent_id(&self) -> Option<DbId> {
        self.parent_id
    }
}
