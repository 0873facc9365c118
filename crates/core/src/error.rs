//! Domain error type shared by the DB and API layers.

use crate::types::DbId;

/// Domain-level errors. The API layer maps these onto HTTP statuses.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity referenced by id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed domain validation. Recoverable: surfaced to the user
    /// for correction; no partial state is produced.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A concurrent update was detected while writing a cached rating
    /// aggregate. The caller should re-read, recompute, and retry.
    #[error("Stale aggregate: {0}")]
    StaleAggregate(String),

    /// The request carries no valid identity.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The identity is valid but not allowed to perform the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}
