//! Shared request handling helpers

pub mod error;

pub use error::{domain_error_response, validation_error_response};
