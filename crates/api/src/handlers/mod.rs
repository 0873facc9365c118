//! Request handlers, grouped by resource.

pub mod comments;
pub mod recipes;
