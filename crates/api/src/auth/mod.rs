//! Token validation for identities issued by the external auth service.

pub mod jwt;
