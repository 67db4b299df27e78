//! Domain services

pub mod entitlement;
pub mod otp;
pub mod rate_limit;

pub use entitlement::EntitlementService;
pub use otp::{OtpCleanupService, OtpService, SendOutcome, SmsGateway, VerifyOutcome};
pub use rate_limit::{RateLimitDecision, SlidingWindowLimiter};
