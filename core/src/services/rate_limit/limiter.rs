//! Sliding-window rate limiter over persisted OTP rows

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, warn};

use gx_shared::config::RateLimitConfig;
use gx_shared::utils::phone::mask_phone_number;

use crate::repositories::otp::r#trait::OtpRepository;

/// Outcome of a rate-limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Request is within limits; `remaining_attempts` counts sends still
    /// available in the current window, including the one about to happen
    Allowed { remaining_attempts: u32 },
    /// Request is denied until `retry_after_seconds` have passed
    Limited {
        retry_after_seconds: u64,
        message: String,
    },
}

impl RateLimitDecision {
    /// Whether the decision allows the request
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed { .. })
    }
}

/// Rate limiter deriving windows from the OTP table
///
/// Two rules apply, in order: a phone may not exceed `max_per_window` sends
/// inside the trailing window, and consecutive sends must be at least
/// `cooldown_seconds` apart. When the storage backing the window cannot be
/// queried the limiter fails open (configurable): an outage should not lock
/// legitimate users out of signup.
pub struct SlidingWindowLimiter<R: OtpRepository> {
    repository: Arc<R>,
    config: RateLimitConfig,
}

impl<R: OtpRepository> SlidingWindowLimiter<R> {
    /// Create a new limiter over the given repository
    pub fn new(repository: Arc<R>, config: RateLimitConfig) -> Self {
        Self { repository, config }
    }

    /// Check whether a phone number may request another OTP
    pub async fn check(&self, phone: &str) -> RateLimitDecision {
        if !self.config.enabled {
            return RateLimitDecision::Allowed {
                remaining_attempts: self.config.max_per_window,
            };
        }

        let now = Utc::now();
        let window_start = now - Duration::seconds(self.config.window_seconds as i64);

        let count = match self
            .repository
            .count_created_since(phone, window_start)
            .await
        {
            Ok(count) => count,
            Err(e) => return self.storage_failure(phone, &e.to_string()),
        };

        if count >= self.config.max_per_window {
            let oldest = match self
                .repository
                .oldest_created_since(phone, window_start)
                .await
            {
                Ok(oldest) => oldest,
                Err(e) => return self.storage_failure(phone, &e.to_string()),
            };

            let retry_after_seconds = oldest
                .map(|ts| {
                    let window = Duration::seconds(self.config.window_seconds as i64);
                    (ts + window - now).num_seconds().max(1) as u64
                })
                .unwrap_or(self.config.window_seconds);

            warn!(
                phone = %mask_phone_number(phone),
                count = count,
                retry_after_seconds = retry_after_seconds,
                event = "rate_limit_exceeded",
                "OTP send limit exceeded for phone number"
            );

            return RateLimitDecision::Limited {
                retry_after_seconds,
                message: format!(
                    "Too many OTP requests. Please try again in {}",
                    format_wait(retry_after_seconds)
                ),
            };
        }

        // Window has room; enforce the gap since the most recent send
        let latest = match self.repository.latest_created_at(phone).await {
            Ok(latest) => latest,
            Err(e) => return self.storage_failure(phone, &e.to_string()),
        };

        if let Some(latest) = latest {
            let elapsed = (now - latest).num_seconds().max(0) as u64;
            if elapsed < self.config.cooldown_seconds {
                let retry_after_seconds = self.config.cooldown_seconds - elapsed;
                warn!(
                    phone = %mask_phone_number(phone),
                    retry_after_seconds = retry_after_seconds,
                    event = "cooldown_active",
                    "OTP resend requested before cooldown elapsed"
                );
                return RateLimitDecision::Limited {
                    retry_after_seconds,
                    message: format!(
                        "Please wait {} second(s) before requesting another code",
                        retry_after_seconds
                    ),
                };
            }
        }

        RateLimitDecision::Allowed {
            remaining_attempts: self.config.max_per_window - count,
        }
    }

    fn storage_failure(&self, phone: &str, message: &str) -> RateLimitDecision {
        if self.config.fail_open {
            error!(
                phone = %mask_phone_number(phone),
                error = message,
                event = "rate_limit_fail_open",
                "Rate limit storage unavailable, allowing request"
            );
            RateLimitDecision::Allowed {
                remaining_attempts: self.config.max_per_window,
            }
        } else {
            error!(
                phone = %mask_phone_number(phone),
                error = message,
                event = "rate_limit_fail_closed",
                "Rate limit storage unavailable, denying request"
            );
            RateLimitDecision::Limited {
                retry_after_seconds: self.config.cooldown_seconds,
                message: "Verification is temporarily unavailable. Please try again shortly"
                    .to_string(),
            }
        }
    }
}

/// Format a wait duration for user-facing messages
fn format_wait(seconds: u64) -> String {
    if seconds >= 60 {
        let minutes = (seconds + 59) / 60;
        format!("{} minute(s)", minutes)
    } else {
        format!("{} second(s)", seconds)
    }
}

#[cfg(test)]
mod format_tests {
    use super::format_wait;

    #[test]
    fn test_format_wait() {
        assert_eq!(format_wait(30), "30 second(s)");
        assert_eq!(format_wait(60), "1 minute(s)");
        assert_eq!(format_wait(61), "2 minute(s)");
        assert_eq!(format_wait(3600), "60 minute(s)");
    }
}
