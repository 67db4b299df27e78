//! Tests for the in-memory OTP repository

use chrono::{Duration, Utc};

use crate::domain::entities::otp_record::OtpRecord;
use crate::repositories::otp::mock::MockOtpRepository;
use crate::repositories::otp::r#trait::OtpRepository;

fn record_for(phone: &str) -> OtpRecord {
    OtpRecord::new(phone.to_string(), "123456".to_string())
}

#[tokio::test]
async fn test_create_and_find_latest_active() {
    let repo = MockOtpRepository::new();
    let record = record_for("9876543210");
    repo.create(&record).await.unwrap();

    let found = repo.find_latest_active("9876543210").await.unwrap();
    assert_eq!(found.map(|r| r.id), Some(record.id));

    let missing = repo.find_latest_active("9123456780").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_latest_active_skips_used_records() {
    let repo = MockOtpRepository::new();
    let record = record_for("9876543210");
    repo.create(&record).await.unwrap();
    repo.mark_used(record.id).await.unwrap();

    let found = repo.find_latest_active("9876543210").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_latest_active_returns_newest() {
    let repo = MockOtpRepository::new();
    let mut older = record_for("9876543210");
    older.created_at = Utc::now() - Duration::minutes(5);
    let newer = record_for("9876543210");
    repo.create(&older).await.unwrap();
    repo.create(&newer).await.unwrap();

    let found = repo.find_latest_active("9876543210").await.unwrap().unwrap();
    assert_eq!(found.id, newer.id);
}

#[tokio::test]
async fn test_increment_attempts() {
    let repo = MockOtpRepository::new();
    let record = record_for("9876543210");
    repo.create(&record).await.unwrap();

    assert_eq!(repo.increment_attempts(record.id).await.unwrap(), 1);
    assert_eq!(repo.increment_attempts(record.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_window_queries() {
    let repo = MockOtpRepository::new();
    let phone = "9876543210";

    let mut outside = record_for(phone);
    outside.created_at = Utc::now() - Duration::hours(2);
    repo.create(&outside).await.unwrap();

    let inside = record_for(phone);
    repo.create(&inside).await.unwrap();

    let since = Utc::now() - Duration::hours(1);
    assert_eq!(repo.count_created_since(phone, since).await.unwrap(), 1);
    assert_eq!(
        repo.oldest_created_since(phone, since).await.unwrap(),
        Some(inside.created_at)
    );
    assert_eq!(
        repo.latest_created_at(phone).await.unwrap(),
        Some(inside.created_at)
    );
}

#[tokio::test]
async fn test_purge_created_before() {
    let repo = MockOtpRepository::new();
    let mut old = record_for("9876543210");
    old.created_at = Utc::now() - Duration::hours(25);
    repo.create(&old).await.unwrap();
    repo.create(&record_for("9876543210")).await.unwrap();

    let cutoff = Utc::now() - Duration::hours(24);
    let purged = repo.purge_created_before(cutoff).await.unwrap();
    assert_eq!(purged, 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_simulated_read_failure() {
    let repo = MockOtpRepository::new();
    repo.set_fail_reads(true).await;

    let since = Utc::now() - Duration::hours(1);
    assert!(repo.count_created_since("9876543210", since).await.is_err());

    repo.set_fail_reads(false).await;
    assert!(repo.count_created_since("9876543210", since).await.is_ok());
}
