//! Error types for user operations.

use groundwork_database::DbError;
use thiserror::Error;

/// User-facing failures raised by the user usecase.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("name is required")]
    NameRequired,

    #[error("email is required")]
    EmailRequired,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("user not found")]
    NotFound,

    #[error("email is already registered")]
    EmailTaken,

    #[error("password hashing failed")]
    PasswordHash,

    #[error(transparent)]
    Repo(#[from] DbError),
}

/// Result type for user operations.
pub type UserResult<T> = Result<T, UserError>;
