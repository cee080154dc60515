//! DTO modules that bridge the list controller with the backend API.

pub mod envelope;
pub mod query;
