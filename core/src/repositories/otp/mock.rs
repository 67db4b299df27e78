//! In-memory implementation of OtpRepository for tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRepository;

/// In-memory OTP repository for tests and local development
///
/// Can be switched into a failing mode to exercise the limiter's fail-open
/// behaviour.
pub struct MockOtpRepository {
    records: Arc<RwLock<HashMap<Uuid, OtpRecord>>>,
    fail_reads: Arc<RwLock<bool>>,
}

impl MockOtpRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_reads: Arc::new(RwLock::new(false)),
        }
    }

    /// Make all subsequent window queries fail with a database error
    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    /// Number of stored records (test helper)
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Fetch a record by id (test helper)
    pub async fn get(&self, id: Uuid) -> Option<OtpRecord> {
        self.records.read().await.get(&id).cloned()
    }

    async fn check_read_failure(&self) -> Result<(), DomainError> {
        if *self.fail_reads.read().await {
            return Err(DomainError::Database {
                message: "simulated storage failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockOtpRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRepository for MockOtpRepository {
    async fn create(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn find_latest_active(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        self.check_read_failure().await?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.phone == phone && !r.is_used && !r.is_expired())
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&id) {
            record.mark_used();
        }
        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&id) {
            Some(record) => {
                record.attempts += 1;
                Ok(record.attempts)
            }
            None => Err(DomainError::NotFound {
                resource: "OTP record".to_string(),
            }),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.remove(&id);
        Ok(())
    }

    async fn count_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        self.check_read_failure().await?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.phone == phone && r.created_at >= since)
            .count() as u32)
    }

    async fn oldest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.check_read_failure().await?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.phone == phone && r.created_at >= since)
            .map(|r| r.created_at)
            .min())
    }

    async fn latest_created_at(&self, phone: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        self.check_read_failure().await?;
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.phone == phone)
            .map(|r| r.created_at)
            .max())
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| r.created_at >= cutoff);
        Ok((before - records.len()) as u64)
    }
}
