//! # Infrastructure Layer
//!
//! Concrete implementations behind the domain layer's traits: MySQL
//! persistence for OTP codes and plans, and SMS gateway adapters for the
//! supported Indian providers (MSG91, TextLocal) plus Twilio.

/// Database module - MySQL implementations using SQLx
pub mod database;

/// SMS gateway module - provider adapters and factory
pub mod sms;

pub use database::{DatabasePool, MySqlOtpRepository, MySqlPlanRepository};
pub use sms::create_sms_gateway;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS gateway error
    #[error("SMS gateway error: {0}")]
    Sms(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
