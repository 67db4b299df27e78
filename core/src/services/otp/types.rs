//! Result types for the OTP service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a successful OTP send
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOutcome {
    /// Provider-assigned message identifier
    pub message_id: String,
    /// Provider that delivered the message
    pub provider: String,
    /// Earliest time the client may request a resend
    pub next_resend_at: DateTime<Utc>,
    /// Sends still available in the current rate-limit window
    pub remaining_attempts: u32,
}

/// Result of an OTP verification attempt
///
/// Failed verification is an ordinary outcome, not an error: the caller gets
/// a message and the remaining attempt count to show the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Whether the submitted code matched
    pub success: bool,
    /// Verification attempts left on the current code, when known
    pub remaining_attempts: Option<i32>,
    /// User-facing failure message, present when `success` is false
    pub error_message: Option<String>,
}

impl VerifyOutcome {
    /// A successful verification
    pub fn verified() -> Self {
        Self {
            success: true,
            remaining_attempts: None,
            error_message: None,
        }
    }

    /// A failed verification with a user-facing message
    pub fn rejected(message: impl Into<String>, remaining_attempts: Option<i32>) -> Self {
        Self {
            success: false,
            remaining_attempts,
            error_message: Some(message.into()),
        }
    }
}
