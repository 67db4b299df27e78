//! OTP-specific error types
//!
//! These errors describe the user-visible outcomes of the OTP flow. They are
//! converted into `ErrorResponse` envelopes at the API boundary.

use gx_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// OTP flow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid phone number format")]
    InvalidPhoneFormat,

    #[error("Invalid verification code. {remaining_attempts} attempt(s) remaining")]
    InvalidCode { remaining_attempts: i32 },

    #[error("Verification code has expired. Please request a new code")]
    CodeExpired,

    #[error("Verification code has already been used")]
    CodeAlreadyUsed,

    #[error("No verification code found for this phone number")]
    CodeNotFound,

    #[error("Maximum verification attempts exceeded. Please request a new code")]
    MaxAttemptsExceeded,

    #[error("{message}")]
    RateLimited {
        retry_after_seconds: u64,
        message: String,
    },

    #[error("Could not send the verification SMS. Please try again later")]
    SmsFailure { message: String },
}

impl OtpError {
    /// Stable error code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            OtpError::InvalidPhoneFormat => error_codes::PHONE_INVALID,
            OtpError::InvalidCode { .. } => error_codes::OTP_INVALID,
            OtpError::CodeExpired => error_codes::OTP_EXPIRED,
            OtpError::CodeAlreadyUsed => error_codes::OTP_ALREADY_USED,
            OtpError::CodeNotFound => error_codes::OTP_INVALID,
            OtpError::MaxAttemptsExceeded => error_codes::OTP_MAX_ATTEMPTS,
            OtpError::RateLimited { .. } => error_codes::RATE_LIMIT_EXCEEDED,
            OtpError::SmsFailure { .. } => error_codes::SMS_ERROR,
        }
    }
}

impl From<&OtpError> for ErrorResponse {
    fn from(err: &OtpError) -> Self {
        let response = ErrorResponse::new(err.code(), err.to_string());
        match err {
            OtpError::RateLimited {
                retry_after_seconds,
                ..
            } => response.add_detail("retry_after_seconds", retry_after_seconds),
            OtpError::InvalidCode { remaining_attempts } => {
                response.add_detail("remaining_attempts", remaining_attempts)
            }
            _ => response,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            OtpError::InvalidCode {
                remaining_attempts: 2
            }
            .code(),
            "OTP_INVALID"
        );
        assert_eq!(OtpError::CodeExpired.code(), "OTP_EXPIRED");
        assert_eq!(
            OtpError::RateLimited {
                retry_after_seconds: 60,
                message: "wait".into()
            }
            .code(),
            "RATE_LIMIT_EXCEEDED"
        );
    }

    #[test]
    fn test_rate_limited_response_carries_retry_detail() {
        let err = OtpError::RateLimited {
            retry_after_seconds: 120,
            message: "Please wait 2 minutes".to_string(),
        };
        let response: ErrorResponse = (&err).into();
        assert_eq!(response.error, "RATE_LIMIT_EXCEEDED");
        assert_eq!(response.message, "Please wait 2 minutes");
        assert_eq!(response.details.unwrap()["retry_after_seconds"], 120);
    }
}
