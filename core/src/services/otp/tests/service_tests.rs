//! OtpService send and verify behaviour

use std::sync::Arc;

use chrono::{Duration, Utc};
use gx_shared::config::{OtpConfig, RateLimitConfig};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainError, OtpError};
use crate::repositories::otp::mock::MockOtpRepository;
use crate::services::otp::mock::MockSmsGateway;
use crate::services::otp::service::OtpService;

const PHONE: &str = "9876543210";

fn service(
    rate_limit: RateLimitConfig,
) -> (
    Arc<MockOtpRepository>,
    Arc<MockSmsGateway>,
    OtpService<MockOtpRepository, MockSmsGateway>,
) {
    let repository = Arc::new(MockOtpRepository::new());
    let gateway = Arc::new(MockSmsGateway::new());
    let service = OtpService::new(
        repository.clone(),
        gateway.clone(),
        OtpConfig::default(),
        rate_limit,
    );
    (repository, gateway, service)
}

fn default_service() -> (
    Arc<MockOtpRepository>,
    Arc<MockSmsGateway>,
    OtpService<MockOtpRepository, MockSmsGateway>,
) {
    service(RateLimitConfig::default())
}

#[tokio::test]
async fn send_delivers_code_and_persists_record() {
    let (repository, gateway, service) = default_service();

    let outcome = service.send(PHONE).await.unwrap();

    assert_eq!(outcome.provider, "Mock");
    assert_eq!(outcome.remaining_attempts, 2);
    assert!(outcome.next_resend_at > Utc::now());
    assert_eq!(repository.len().await, 1);

    let code = gateway.last_code_for(PHONE).await.unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn send_accepts_e164_prefix_and_stores_canonical() {
    let (_, gateway, service) = default_service();

    service.send("+919876543210").await.unwrap();

    // Gateway receives the canonical ten-digit form
    assert!(gateway.last_code_for(PHONE).await.is_some());
}

#[tokio::test]
async fn send_rejects_malformed_phone() {
    let (repository, _, service) = default_service();

    let err = service.send("12345").await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::InvalidPhoneFormat)));
    assert_eq!(repository.len().await, 0);
}

#[tokio::test]
async fn send_honours_window_limit() {
    let rate_limit = RateLimitConfig {
        cooldown_seconds: 0,
        ..Default::default()
    };
    let (_, _, service) = service(rate_limit);

    for _ in 0..3 {
        service.send(PHONE).await.unwrap();
    }

    let err = service.send(PHONE).await.unwrap_err();
    match err {
        DomainError::Otp(OtpError::RateLimited {
            retry_after_seconds,
            ..
        }) => {
            assert!(retry_after_seconds > 0);
            assert!(retry_after_seconds <= 3600);
        }
        other => panic!("expected RateLimited, got {:?}", other),
    }
}

#[tokio::test]
async fn send_honours_cooldown() {
    let (_, _, service) = default_service();

    service.send(PHONE).await.unwrap();

    let err = service.send(PHONE).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Otp(OtpError::RateLimited { .. })
    ));
}

#[tokio::test]
async fn gateway_failure_rolls_back_persisted_record() {
    let (repository, gateway, service) = default_service();
    gateway.set_fail_sends(true);

    let err = service.send(PHONE).await.unwrap_err();
    assert!(matches!(err, DomainError::Otp(OtpError::SmsFailure { .. })));

    // No dangling code, no burned rate-limit slot
    assert_eq!(repository.len().await, 0);

    gateway.set_fail_sends(false);
    let outcome = service.send(PHONE).await.unwrap();
    assert_eq!(outcome.remaining_attempts, 2);
}

#[tokio::test]
async fn verify_accepts_correct_code_once() {
    let (_, gateway, service) = default_service();

    service.send(PHONE).await.unwrap();
    let code = gateway.last_code_for(PHONE).await.unwrap();

    let outcome = service.verify(PHONE, &code).await.unwrap();
    assert!(outcome.success);

    // Single use: the same code is rejected on replay
    let replay = service.verify(PHONE, &code).await.unwrap();
    assert!(!replay.success);
}

#[tokio::test]
async fn verify_rejects_wrong_code_and_counts_attempts() {
    let (_, gateway, service) = default_service();

    service.send(PHONE).await.unwrap();
    let code = gateway.last_code_for(PHONE).await.unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let first = service.verify(PHONE, wrong).await.unwrap();
    assert!(!first.success);
    assert_eq!(first.remaining_attempts, Some(2));

    let second = service.verify(PHONE, wrong).await.unwrap();
    assert!(!second.success);
    assert_eq!(second.remaining_attempts, Some(1));

    let third = service.verify(PHONE, wrong).await.unwrap();
    assert!(!third.success);
    assert_eq!(third.remaining_attempts, Some(0));

    // Attempts exhausted: even the right code is rejected now
    let exhausted = service.verify(PHONE, &code).await.unwrap();
    assert!(!exhausted.success);
    assert_eq!(exhausted.remaining_attempts, Some(0));
}

#[tokio::test]
async fn verify_rejects_malformed_code_without_touching_storage() {
    let (repository, _, service) = default_service();
    repository.set_fail_reads(true).await;

    let outcome = service.verify(PHONE, "12ab56").await.unwrap();
    assert!(!outcome.success);

    let outcome = service.verify(PHONE, "12345").await.unwrap();
    assert!(!outcome.success);
}

#[tokio::test]
async fn verify_rejects_when_no_active_code_exists() {
    let (_, _, service) = default_service();

    let outcome = service.verify(PHONE, "123456").await.unwrap();
    assert!(!outcome.success);
    assert!(outcome
        .error_message
        .unwrap()
        .contains("expired or was never sent"));
}

#[tokio::test]
async fn verify_ignores_expired_codes() {
    let (repository, _, service) = default_service();

    let mut record = OtpRecord::new_with_expiration(PHONE.to_string(), "123456".to_string(), 10);
    record.expires_at = Utc::now() - Duration::minutes(1);
    use crate::repositories::otp::r#trait::OtpRepository;
    repository.create(&record).await.unwrap();

    let outcome = service.verify(PHONE, "123456").await.unwrap();
    assert!(!outcome.success);
}

#[tokio::test]
async fn storage_outage_fails_open_when_configured() {
    let (repository, _, service) = default_service();
    repository.set_fail_reads(true).await;

    // fail_open defaults to true: the send goes through
    let outcome = service.send(PHONE).await.unwrap();
    assert_eq!(outcome.provider, "Mock");
}

#[tokio::test]
async fn storage_outage_fails_closed_when_configured() {
    let rate_limit = RateLimitConfig {
        fail_open: false,
        ..Default::default()
    };
    let (repository, _, service) = service(rate_limit);
    repository.set_fail_reads(true).await;

    let err = service.send(PHONE).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Otp(OtpError::RateLimited { .. })
    ));
}

#[test]
fn generated_codes_are_six_digits() {
    for _ in 0..100 {
        let code = OtpService::<MockOtpRepository, MockSmsGateway>::generate_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}
