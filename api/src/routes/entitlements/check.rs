use actix_web::{web, HttpResponse};
use validator::Validate;

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::types::response::ApiResponse;

use crate::dto::entitlement::{CheckAccessRequest, CheckAccessResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/entitlements/check
///
/// Answers whether any of the student's current plans covers the exam.
/// An unknown phone or exam is an ordinary `has_access: false`, not a 404.
pub async fn check_access<R, G, P>(
    state: web::Data<AppState<R, G, P>>,
    request: web::Json<CheckAccessRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        return validation_error_response(&errors);
    }

    match state
        .entitlement_service
        .has_access(&request.phone, &request.exam_id)
        .await
    {
        Ok(has_access) => {
            HttpResponse::Ok().json(ApiResponse::success(CheckAccessResponse { has_access }))
        }
        Err(error) => domain_error_response(&error),
    }
}
