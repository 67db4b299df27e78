//! OTP repository trait defining the interface for OTP record persistence.
//!
//! The OTP table doubles as the rate-limit log: the sliding window and
//! cooldown are derived from row counts and timestamps, so the trait exposes
//! the window queries alongside the record lifecycle operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
#[async_trait]
pub trait OtpRepository: Send + Sync {
    /// Persist a newly generated OTP record
    async fn create(&self, record: &OtpRecord) -> Result<(), DomainError>;

    /// Find the most recent unused, unexpired record for a phone number
    ///
    /// Returns `Ok(None)` when no such record exists.
    async fn find_latest_active(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Mark a record as used. Marking an already-used record is a no-op.
    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError>;

    /// Increment the verification attempt counter, returning the new count
    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError>;

    /// Delete a record (used to roll back a persisted code whose SMS never
    /// went out)
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;

    /// Count records created for a phone number at or after `since`
    async fn count_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError>;

    /// Creation time of the oldest record for a phone number at or after
    /// `since`, if any
    async fn oldest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Creation time of the most recent record for a phone number, if any
    async fn latest_created_at(&self, phone: &str) -> Result<Option<DateTime<Utc>>, DomainError>;

    /// Delete all records created before `cutoff`, returning the number of
    /// rows removed (maintenance sweep)
    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
