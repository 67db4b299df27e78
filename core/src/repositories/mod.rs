//! Repository interfaces for domain persistence
//!
//! Concrete implementations live in the infrastructure crate; in-memory
//! mocks are provided here for tests and local development.

pub mod otp;
pub mod plan;

pub use otp::{MockOtpRepository, OtpRepository};
pub use plan::{MockPlanRepository, PlanRepository};
