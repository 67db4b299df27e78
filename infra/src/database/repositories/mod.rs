//! MySQL repository implementations

pub mod otp_repository;
pub mod plan_repository;

pub use otp_repository::MySqlOtpRepository;
pub use plan_repository::MySqlPlanRepository;
