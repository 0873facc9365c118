//! Pure domain logic for the recipeshare backend.
//!
//! No I/O lives here: everything is a synchronous computation over values
//! supplied (and persisted) by the DB and API layers.

pub mod comments;
pub mod error;
pub mod recipe;
pub mod types;
