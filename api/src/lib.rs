//! HTTP API layer for the GovExams backend
//!
//! Thin actix-web handlers over the domain services: OTP send/verify,
//! entitlement checks and the plan status back-office endpoint.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use routes::AppState;
