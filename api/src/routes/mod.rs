//! Route registration and shared application state

pub mod auth;
pub mod entitlements;
pub mod plans;

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::entitlement::EntitlementService;
use gx_core::services::otp::service::OtpService;
use gx_core::services::otp::traits::SmsGateway;

/// Application state holding the shared domain services
pub struct AppState<R, G, P>
where
    R: OtpRepository,
    G: SmsGateway,
    P: PlanRepository,
{
    pub otp_service: Arc<OtpService<R, G>>,
    pub entitlement_service: Arc<EntitlementService<P>>,
}

/// Register all API routes
pub fn configure<R, G, P>(cfg: &mut web::ServiceConfig)
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/api/v1")
            .service(
                web::scope("/auth")
                    .route("/send-code", web::post().to(auth::send_code::<R, G, P>))
                    .route("/verify-code", web::post().to(auth::verify_code::<R, G, P>)),
            )
            .service(
                web::scope("/entitlements")
                    .route("/check", web::post().to(entitlements::check_access::<R, G, P>))
                    .route(
                        "/exams",
                        web::get().to(entitlements::accessible_exams::<R, G, P>),
                    ),
            )
            .service(
                web::scope("/plans")
                    .route("/{id}/status", web::patch().to(plans::set_status::<R, G, P>)),
            ),
    );
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "govexams-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
