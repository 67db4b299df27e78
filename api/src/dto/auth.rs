use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Ten-digit Indian mobile number, optionally prefixed with +91 or 91
    #[validate(length(min = 10, max = 13, message = "Phone number must be 10 digits"))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Ten-digit Indian mobile number, optionally prefixed with +91 or 91
    #[validate(length(min = 10, max = 13, message = "Phone number must be 10 digits"))]
    pub phone: String,

    /// 6-digit verification code
    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    pub message: String,
    /// Provider that accepted the message
    pub provider: String,
    /// Earliest time the client may request a resend
    pub next_resend_at: DateTime<Utc>,
    /// Sends still available in the current rate-limit window
    pub attempts_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Verification attempts left on the current code, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<i32>,
}
