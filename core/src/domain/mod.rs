//! Domain layer: entities and value objects

pub mod entities;

pub use entities::otp_record::OtpRecord;
pub use entities::plan::Plan;
