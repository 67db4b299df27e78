use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckAccessRequest {
    /// Ten-digit Indian mobile number, optionally prefixed with +91 or 91
    #[validate(length(min = 10, max = 13, message = "Phone number must be 10 digits"))]
    pub phone: String,

    /// Exam identifier to check access for
    #[validate(length(min = 1, message = "Exam id must not be empty"))]
    pub exam_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckAccessResponse {
    pub has_access: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExamsQuery {
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamsResponse {
    /// Exam identifiers the student's current plans cover, sorted
    pub exams: Vec<String>,
}
