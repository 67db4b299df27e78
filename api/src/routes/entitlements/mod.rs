//! Exam entitlement endpoints

mod check;
mod exams;

pub use check::check_access;
pub use exams::accessible_exams;
