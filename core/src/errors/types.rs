//! Umbrella domain error type

use thiserror::Error;

use super::domain_error::OtpError;

/// Result type used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;

/// Top-level domain error
#[derive(Error, Debug)]
pub enum DomainError {
    /// OTP flow error
    #[error(transparent)]
    Otp(#[from] OtpError),

    /// Request data failed validation
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Underlying storage failed
    #[error("Database error: {message}")]
    Database { message: String },

    /// Requested resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Shorthand for a database error from any displayable source
    pub fn database(err: impl std::fmt::Display) -> Self {
        DomainError::Database {
            message: err.to_string(),
        }
    }
}
