//! MySQL implementation of the OtpRepository trait.
//!
//! Persists OTP records in the `otp_codes` table. The same table feeds the
//! rate limiter's window queries, so the indexes on `(phone, created_at)`
//! matter for the send path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gx_core::domain::entities::otp_record::OtpRecord;
use gx_core::errors::DomainError;
use gx_core::repositories::otp::r#trait::OtpRepository;

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    /// Create a new MySQL OTP repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::database(format!("Failed to get id: {}", e)))?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::database(format!("Invalid record UUID: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::database(format!("Failed to get phone: {}", e)))?,
            code: row
                .try_get("otp_code")
                .map_err(|e| DomainError::database(format!("Failed to get otp_code: {}", e)))?,
            attempts: row
                .try_get("attempt_count")
                .map_err(|e| DomainError::database(format!("Failed to get attempt_count: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::database(format!("Failed to get created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::database(format!("Failed to get expires_at: {}", e)))?,
            is_used: row
                .try_get("is_used")
                .map_err(|e| DomainError::database(format!("Failed to get is_used: {}", e)))?,
        })
    }
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn create(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO otp_codes (
                id, phone, otp_code, attempt_count, created_at, expires_at, is_used
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(record.id.to_string())
            .bind(&record.phone)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.created_at)
            .bind(record.expires_at)
            .bind(record.is_used)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to insert OTP record: {}", e)))?;

        Ok(())
    }

    async fn find_latest_active(&self, phone: &str) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT id, phone, otp_code, attempt_count, created_at, expires_at, is_used
            FROM otp_codes
            WHERE phone = ? AND is_used = FALSE AND expires_at > NOW()
            ORDER BY created_at DESC
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to query OTP record: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), DomainError> {
        // Idempotent: marking an already-used record changes nothing
        sqlx::query("UPDATE otp_codes SET is_used = TRUE WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to mark OTP used: {}", e)))?;

        Ok(())
    }

    async fn increment_attempts(&self, id: Uuid) -> Result<i32, DomainError> {
        let result =
            sqlx::query("UPDATE otp_codes SET attempt_count = attempt_count + 1 WHERE id = ?")
                .bind(id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to increment attempts: {}", e))
                })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "OTP record".to_string(),
            });
        }

        let row = sqlx::query("SELECT attempt_count FROM otp_codes WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to read attempt count: {}", e)))?;

        row.try_get("attempt_count")
            .map_err(|e| DomainError::database(format!("Failed to get attempt_count: {}", e)))
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otp_codes WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete OTP record: {}", e)))?;

        Ok(())
    }

    async fn count_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) as send_count FROM otp_codes WHERE phone = ? AND created_at >= ?",
        )
        .bind(phone)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to count OTP sends: {}", e)))?;

        let count: i64 = row
            .try_get("send_count")
            .map_err(|e| DomainError::database(format!("Failed to get send_count: {}", e)))?;

        Ok(count as u32)
    }

    async fn oldest_created_since(
        &self,
        phone: &str,
        since: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, DomainError> {
        let row = sqlx::query(
            "SELECT MIN(created_at) as oldest FROM otp_codes WHERE phone = ? AND created_at >= ?",
        )
        .bind(phone)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to query oldest send: {}", e)))?;

        row.try_get::<Option<DateTime<Utc>>, _>("oldest")
            .map_err(|e| DomainError::database(format!("Failed to get oldest: {}", e)))
    }

    async fn latest_created_at(&self, phone: &str) -> Result<Option<DateTime<Utc>>, DomainError> {
        let row =
            sqlx::query("SELECT MAX(created_at) as latest FROM otp_codes WHERE phone = ?")
                .bind(phone)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to query latest send: {}", e)))?;

        row.try_get::<Option<DateTime<Utc>>, _>("latest")
            .map_err(|e| DomainError::database(format!("Failed to get latest: {}", e)))
    }

    async fn purge_created_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_codes WHERE created_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to purge OTP records: {}", e)))?;

        Ok(result.rows_affected())
    }
}
