//! Domain error types

pub mod domain_error;
pub mod types;

pub use domain_error::OtpError;
pub use types::{DomainError, DomainResult};
