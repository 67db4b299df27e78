use actix_web::{web, HttpResponse};

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::errors::{error_codes, ErrorResponse};
use gx_shared::types::response::ApiResponse;
use gx_shared::utils::phone::is_valid_phone;

use crate::dto::entitlement::{ExamsQuery, ExamsResponse};
use crate::handlers::domain_error_response;
use crate::routes::AppState;

/// Handler for GET /api/v1/entitlements/exams?phone=...
///
/// Lists every exam the student's current plans cover, across both the
/// canonical and legacy exam fields.
pub async fn accessible_exams<R, G, P>(
    state: web::Data<AppState<R, G, P>>,
    query: web::Query<ExamsQuery>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    if !is_valid_phone(&query.phone) {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            error_codes::PHONE_INVALID,
            "Invalid phone number format",
        ));
    }

    match state.entitlement_service.accessible_exams(&query.phone).await {
        Ok(exams) => HttpResponse::Ok().json(ApiResponse::success(ExamsResponse { exams })),
        Err(error) => domain_error_response(&error),
    }
}
