//! Exam access entitlement checks
//!
//! Resolves whether a student's purchased plans grant access to an exam, and
//! lists everything their current plans cover.

pub mod service;

pub use service::EntitlementService;

#[cfg(test)]
mod tests;
