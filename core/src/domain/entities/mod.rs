//! Domain entities

pub mod otp_record;
pub mod plan;

pub use otp_record::OtpRecord;
pub use plan::Plan;
