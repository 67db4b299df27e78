//! OTP generation and delivery configuration

use serde::{Deserialize, Serialize};

/// OTP service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes until a generated code expires
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,

    /// Maximum verification attempts per code
    #[serde(default = "default_max_verify_attempts")]
    pub max_verify_attempts: i32,

    /// Age in hours after which OTP rows are purged by the cleanup sweep
    #[serde(default = "default_retention_hours")]
    pub retention_hours: i64,

    /// Cleanup sweep interval in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiration_minutes: default_expiration_minutes(),
            max_verify_attempts: default_max_verify_attempts(),
            retention_hours: default_retention_hours(),
            cleanup_interval_seconds: default_cleanup_interval(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            expiration_minutes: std::env::var("OTP_EXPIRATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_expiration_minutes),
            max_verify_attempts: std::env::var("OTP_MAX_VERIFY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_verify_attempts),
            retention_hours: std::env::var("OTP_RETENTION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_retention_hours),
            cleanup_interval_seconds: std::env::var("OTP_CLEANUP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_cleanup_interval),
        }
    }
}

fn default_expiration_minutes() -> i64 {
    10
}

fn default_max_verify_attempts() -> i32 {
    3
}

fn default_retention_hours() -> i64 {
    24
}

fn default_cleanup_interval() -> u64 {
    3600
}
