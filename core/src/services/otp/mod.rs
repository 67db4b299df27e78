//! OTP issuance and verification
//!
//! The service generates codes, gates sends behind the rate limiter, hands
//! delivery to the configured SMS gateway, and verifies submitted codes
//! against the persisted records.

pub mod cleanup;
pub mod mock;
pub mod service;
pub mod traits;
pub mod types;

pub use cleanup::{CleanupResult, OtpCleanupService};
pub use mock::MockSmsGateway;
pub use service::OtpService;
pub use traits::{SmsDelivery, SmsGateway, SmsGatewayError};
pub use types::{SendOutcome, VerifyOutcome};

#[cfg(test)]
mod tests;
