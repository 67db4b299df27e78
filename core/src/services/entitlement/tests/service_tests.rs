//! EntitlementService behaviour against the in-memory plan repository

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::plan::Plan;
use crate::errors::DomainError;
use crate::repositories::plan::mock::MockPlanRepository;
use crate::services::entitlement::EntitlementService;

const PHONE: &str = "9876543210";

fn setup() -> (Arc<MockPlanRepository>, EntitlementService<MockPlanRepository>) {
    let repository = Arc::new(MockPlanRepository::new());
    let service = EntitlementService::new(repository.clone());
    (repository, service)
}

fn plan(exam_ids: &[&str], subjects: &[&str]) -> Plan {
    let mut plan = Plan::new(
        "DMLT Complete".to_string(),
        PHONE.to_string(),
        exam_ids.iter().map(|s| s.to_string()).collect(),
        None,
        499.0,
    );
    plan.subjects = subjects.iter().map(|s| s.to_string()).collect();
    plan
}

#[tokio::test]
async fn grants_access_for_exam_in_active_plan() {
    let (repository, service) = setup();
    repository.insert(plan(&["dmlt-paper-1"], &[])).await;

    assert!(service.has_access(PHONE, "dmlt-paper-1").await.unwrap());
    assert!(!service.has_access(PHONE, "cho-paper-1").await.unwrap());
}

#[tokio::test]
async fn grants_access_via_legacy_subjects() {
    let (repository, service) = setup();
    repository.insert(plan(&[], &["hematology"])).await;

    assert!(service.has_access(PHONE, "hematology").await.unwrap());
}

#[tokio::test]
async fn denies_access_for_unknown_phone() {
    let (_, service) = setup();

    assert!(!service.has_access("9123456780", "dmlt-paper-1").await.unwrap());
}

#[tokio::test]
async fn denies_access_for_deactivated_plan() {
    let (repository, service) = setup();
    let mut p = plan(&["dmlt-paper-1"], &[]);
    p.is_active = false;
    repository.insert(p).await;

    assert!(!service.has_access(PHONE, "dmlt-paper-1").await.unwrap());
}

#[tokio::test]
async fn denies_access_for_expired_plan() {
    let (repository, service) = setup();
    let mut p = plan(&["dmlt-paper-1"], &[]);
    p.expires_at = Some(Utc::now() - Duration::days(1));
    repository.insert(p).await;

    assert!(!service.has_access(PHONE, "dmlt-paper-1").await.unwrap());
}

#[tokio::test]
async fn canonicalizes_phone_before_lookup() {
    let (repository, service) = setup();
    repository.insert(plan(&["dmlt-paper-1"], &[])).await;

    assert!(service
        .has_access("+919876543210", "dmlt-paper-1")
        .await
        .unwrap());
}

#[tokio::test]
async fn accessible_exams_unions_across_plans_and_fields() {
    let (repository, service) = setup();
    repository.insert(plan(&["dmlt-paper-1"], &["hematology"])).await;
    repository.insert(plan(&["dmlt-paper-2"], &[])).await;

    let mut expired = plan(&["cho-paper-1"], &[]);
    expired.expires_at = Some(Utc::now() - Duration::days(1));
    repository.insert(expired).await;

    let exams = service.accessible_exams(PHONE).await.unwrap();
    assert_eq!(exams, vec!["dmlt-paper-1", "dmlt-paper-2", "hematology"]);
}

#[tokio::test]
async fn accessible_exams_empty_without_plans() {
    let (_, service) = setup();

    let exams = service.accessible_exams(PHONE).await.unwrap();
    assert!(exams.is_empty());
}

#[tokio::test]
async fn set_plan_status_toggles_and_reports_missing() {
    let (repository, service) = setup();
    let p = plan(&["dmlt-paper-1"], &[]);
    let id = p.id;
    repository.insert(p).await;

    let updated = service.set_plan_status(id, false).await.unwrap();
    assert!(!updated.is_active);
    assert!(!service.has_access(PHONE, "dmlt-paper-1").await.unwrap());

    let err = service.set_plan_status(Uuid::new_v4(), true).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn migrate_legacy_subjects_preserves_access() {
    let (repository, service) = setup();
    repository.insert(plan(&["dmlt-paper-1"], &["hematology"])).await;

    let rewritten = service.migrate_legacy_subjects().await.unwrap();
    assert_eq!(rewritten, 1);

    assert!(service.has_access(PHONE, "hematology").await.unwrap());
    // Second run is a no-op
    assert_eq!(service.migrate_legacy_subjects().await.unwrap(), 0);
}
