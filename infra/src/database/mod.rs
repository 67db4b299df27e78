//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management and repository implementations for the
//! `otp_codes` and `plans` tables.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{MySqlOtpRepository, MySqlPlanRepository};
