//! OTP record entity for phone-based signup verification.
//!
//! The record carries state only: expiry, single-use flag, and the persisted
//! attempt counter. The verification policy (attempt cap, counter updates)
//! lives in `OtpService`, driven by `OtpConfig`, so there is exactly one
//! place that decides how many attempts a code gets.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the OTP code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for OTP codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// A one-time password issued to a phone number during signup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Phone number this code was sent to (canonical form)
    pub phone: String,

    /// The 6-digit code
    pub code: String,

    /// Number of verification attempts made against this code
    pub attempts: i32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Whether the code has been successfully used
    pub is_used: bool,
}

impl OtpRecord {
    /// Creates a new OTP record with the given code and the default expiry
    pub fn new(phone: String, code: String) -> Self {
        Self::new_with_expiration(phone, code, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new OTP record with a custom expiration time
    pub fn new_with_expiration(phone: String, code: String, expiration_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            code,
            attempts: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
        }
    }

    /// Checks if the code has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Compares a submitted code against this record in constant time
    pub fn code_matches(&self, input_code: &str) -> bool {
        self.code.len() == input_code.len()
            && constant_time_eq(self.code.as_bytes(), input_code.as_bytes())
    }

    /// Marks the code as used. Idempotent: marking an already-used code is
    /// a no-op.
    pub fn mark_used(&mut self) {
        self.is_used = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_code(code: &str) -> OtpRecord {
        OtpRecord::new("9876543210".to_string(), code.to_string())
    }

    #[test]
    fn test_new_record() {
        let record = record_with_code("123456");

        assert_eq!(record.phone, "9876543210");
        assert_eq!(record.attempts, 0);
        assert!(!record.is_used);
        assert!(!record.is_expired());
        assert_eq!(
            record.expires_at,
            record.created_at + Duration::minutes(DEFAULT_EXPIRATION_MINUTES)
        );
    }

    #[test]
    fn test_expired_code_detected() {
        let record =
            OtpRecord::new_with_expiration("9876543210".to_string(), "123456".to_string(), 0);
        std::thread::sleep(std::time::Duration::from_millis(10));

        assert!(record.is_expired());
    }

    #[test]
    fn test_mark_used_idempotent() {
        let mut record = record_with_code("123456");
        record.mark_used();
        record.mark_used();
        assert!(record.is_used);
    }

    #[test]
    fn test_code_matches_is_length_sensitive() {
        let record = record_with_code("123456");
        assert!(record.code_matches("123456"));
        assert!(!record.code_matches("12345"));
        assert!(!record.code_matches("654321"));
    }
}
