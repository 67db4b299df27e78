//! Integration tests for the signup OTP endpoints

use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use gx_api::routes::{self, AppState};
use gx_core::repositories::otp::mock::MockOtpRepository;
use gx_core::services::entitlement::EntitlementService;
use gx_core::services::otp::mock::MockSmsGateway;
use gx_core::services::otp::service::OtpService;
use gx_core::repositories::plan::mock::MockPlanRepository;
use gx_shared::config::{OtpConfig, RateLimitConfig};

const PHONE: &str = "9876543210";

struct TestContext {
    repository: Arc<MockOtpRepository>,
    gateway: Arc<MockSmsGateway>,
    state: web::Data<AppState<MockOtpRepository, MockSmsGateway, MockPlanRepository>>,
}

fn context_with(rate_limit: RateLimitConfig) -> TestContext {
    let repository = Arc::new(MockOtpRepository::new());
    let gateway = Arc::new(MockSmsGateway::new());
    let plan_repository = Arc::new(MockPlanRepository::new());

    let otp_service = Arc::new(OtpService::new(
        repository.clone(),
        gateway.clone(),
        OtpConfig::default(),
        rate_limit,
    ));
    let entitlement_service = Arc::new(EntitlementService::new(plan_repository));

    TestContext {
        repository,
        gateway,
        state: web::Data::new(AppState {
            otp_service,
            entitlement_service,
        }),
    }
}

fn context() -> TestContext {
    context_with(RateLimitConfig::default())
}

macro_rules! test_app {
    ($ctx:expr) => {
        test::init_service(
            App::new().app_data($ctx.state.clone()).configure(
                routes::configure::<MockOtpRepository, MockSmsGateway, MockPlanRepository>,
            ),
        )
        .await
    };
}

#[actix_web::test]
async fn send_code_returns_outcome() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["provider"], "Mock");
    assert_eq!(body["data"]["attempts_remaining"], 2);

    assert_eq!(ctx.repository.len().await, 1);
    assert!(ctx.gateway.last_code_for(PHONE).await.is_some());
}

#[actix_web::test]
async fn send_code_rejects_short_phone() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": "12345" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn send_code_rejects_non_indian_mobile() {
    let ctx = context();
    let app = test_app!(ctx);

    // Right length, but Indian mobiles start with 6-9
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": "1234567890" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PHONE_INVALID");
}

#[actix_web::test]
async fn immediate_resend_hits_cooldown() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "RATE_LIMIT_EXCEEDED");
    assert!(body["details"]["retry_after_seconds"].as_u64().unwrap() <= 60);
}

#[actix_web::test]
async fn window_limit_returns_429() {
    let rate_limit = RateLimitConfig {
        cooldown_seconds: 0,
        ..Default::default()
    };
    let ctx = context_with(rate_limit);
    let app = test_app!(ctx);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-code")
            .set_json(json!({ "phone": PHONE }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 200);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 429);
}

#[actix_web::test]
async fn gateway_failure_returns_503() {
    let ctx = context();
    ctx.gateway.set_fail_sends(true);
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "SMS_ERROR");
    // The failed send must not leave a code behind
    assert_eq!(ctx.repository.len().await, 0);
}

#[actix_web::test]
async fn full_send_verify_flow() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let code = ctx.gateway.last_code_for(PHONE).await.unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "phone": PHONE, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], true);

    // Single use: replaying the same code fails
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "phone": PHONE, "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], false);
}

#[actix_web::test]
async fn wrong_code_reports_remaining_attempts() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-code")
        .set_json(json!({ "phone": PHONE }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let code = ctx.gateway.last_code_for(PHONE).await.unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "phone": PHONE, "code": wrong }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], false);
    assert_eq!(body["data"]["attempts_remaining"], 2);
}

#[actix_web::test]
async fn verify_without_code_is_not_an_error_status() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-code")
        .set_json(json!({ "phone": PHONE, "code": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["verified"], false);
}

#[actix_web::test]
async fn health_endpoint_reports_healthy() {
    let ctx = context();
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
