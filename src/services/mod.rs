pub mod attendance;
pub mod debounce;
pub mod editor;
pub mod list;

use thiserror::Error;

use crate::repository::errors::GatewayError;

/// Errors surfaced to callers of the screen services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("Form error: {0}")]
    Form(String),

    /// The backend answered with `success: false`.
    #[error("Rejected: {0}")]
    Rejected(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Type constraint: {0}")]
    TypeConstraint(String),

    #[error("Controller was torn down")]
    Cancelled,
}

pub type ServiceResult<T> = Result<T, ServiceError>;
