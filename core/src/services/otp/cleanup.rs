//! Periodic cleanup sweep for aged OTP rows
//!
//! Expired rows are kept until they age past the retention horizon so the
//! rate-limit window (which only looks back one hour) stays accurate; rows
//! older than the horizon serve no purpose and are purged.

use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{error, info};

use gx_shared::config::OtpConfig;

use crate::errors::DomainResult;
use crate::repositories::otp::r#trait::OtpRepository;

/// Summary of a cleanup cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of OTP rows removed
    pub purged: u64,
}

/// Service purging OTP rows past the retention horizon
pub struct OtpCleanupService<R: OtpRepository + 'static> {
    repository: Arc<R>,
    config: OtpConfig,
}

impl<R: OtpRepository> OtpCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<R>, config: OtpConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> DomainResult<CleanupResult> {
        let cutoff = Utc::now() - Duration::hours(self.config.retention_hours);
        let purged = self.repository.purge_created_before(cutoff).await?;

        if purged > 0 {
            info!(
                purged = purged,
                retention_hours = self.config.retention_hours,
                event = "otp_cleanup",
                "Purged aged OTP rows"
            );
        }

        Ok(CleanupResult { purged })
    }

    /// Run cleanup cycles forever at the configured interval
    ///
    /// Intended to be spawned as a background task from the server binary.
    /// Failures are logged and the loop continues; a transient storage error
    /// should not kill the sweep.
    pub async fn run_periodic(self) {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(
            self.config.cleanup_interval_seconds.max(1),
        ));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            if let Err(e) = self.run_cleanup().await {
                error!(error = %e, "OTP cleanup cycle failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::otp_record::OtpRecord;
    use crate::repositories::otp::mock::MockOtpRepository;

    fn config_with_retention(hours: i64) -> OtpConfig {
        OtpConfig {
            retention_hours: hours,
            ..OtpConfig::default()
        }
    }

    #[tokio::test]
    async fn test_cleanup_purges_only_aged_rows() {
        let repo = Arc::new(MockOtpRepository::new());

        let mut aged = OtpRecord::new("9876543210".to_string(), "123456".to_string());
        aged.created_at = Utc::now() - Duration::hours(30);
        repo.create(&aged).await.unwrap();

        let recent = OtpRecord::new("9876543210".to_string(), "654321".to_string());
        repo.create(&recent).await.unwrap();

        let service = OtpCleanupService::new(repo.clone(), config_with_retention(24));
        let result = service.run_cleanup().await.unwrap();

        assert_eq!(result, CleanupResult { purged: 1 });
        assert_eq!(repo.len().await, 1);
        assert!(repo.get(recent.id).await.is_some());
    }

    #[tokio::test]
    async fn test_cleanup_with_nothing_to_purge() {
        let repo = Arc::new(MockOtpRepository::new());
        let service = OtpCleanupService::new(repo, config_with_retention(24));

        let result = service.run_cleanup().await.unwrap();
        assert_eq!(result.purged, 0);
    }
}
