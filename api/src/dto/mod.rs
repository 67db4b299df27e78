//! Request and response DTOs

pub mod auth;
pub mod entitlement;
pub mod plan;
