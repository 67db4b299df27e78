//! Rate limiting configuration for OTP sends

use serde::{Deserialize, Serialize};

/// Rate limiting configuration for OTP send requests
///
/// The window is derived from persisted OTP rows, so these settings control
/// how far back the limiter looks and how many sends it tolerates. The
/// `fail_open` flag decides what happens when the underlying storage is
/// unreachable: allowing the request (availability over strictness) or
/// denying it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Max OTP sends per phone number within the window
    #[serde(default = "default_max_per_window")]
    pub max_per_window: u32,

    /// Sliding window duration in seconds
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,

    /// Minimum gap between two consecutive sends in seconds
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,

    /// Allow requests through when the storage backing the window
    /// cannot be queried
    #[serde(default = "default_fail_open")]
    pub fail_open: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_per_window: default_max_per_window(),
            window_seconds: default_window_seconds(),
            cooldown_seconds: default_cooldown_seconds(),
            fail_open: default_fail_open(),
        }
    }
}

impl RateLimitConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let parse_u32 = |key: &str, fallback: u32| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };
        let parse_u64 = |key: &str, fallback: u64| {
            std::env::var(key)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            max_per_window: parse_u32("RATE_LIMIT_MAX_PER_WINDOW", default_max_per_window()),
            window_seconds: parse_u64("RATE_LIMIT_WINDOW_SECONDS", default_window_seconds()),
            cooldown_seconds: parse_u64("RATE_LIMIT_COOLDOWN_SECONDS", default_cooldown_seconds()),
            fail_open: std::env::var("RATE_LIMIT_FAIL_OPEN")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            max_per_window: 20,
            cooldown_seconds: 5,
            ..Default::default()
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_max_per_window() -> u32 {
    3
}

fn default_window_seconds() -> u64 {
    3600 // 1 hour
}

fn default_cooldown_seconds() -> u64 {
    60
}

fn default_fail_open() -> bool {
    true
}
