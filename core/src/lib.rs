//! # GovExams Core
//!
//! Core business logic and domain layer for the GovExams backend.
//! This crate contains domain entities, business services, repository
//! interfaces, and error types that form the foundation of the application
//! architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{OtpRecord, Plan};
pub use errors::{DomainError, DomainResult, OtpError};
pub use repositories::{MockOtpRepository, MockPlanRepository, OtpRepository, PlanRepository};
pub use services::{
    EntitlementService, OtpCleanupService, OtpService, SendOutcome, SmsGateway, VerifyOutcome,
};
