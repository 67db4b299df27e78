use actix_web::{web, HttpResponse};
use validator::Validate;

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::types::response::ApiResponse;
use gx_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/verify-code
///
/// Checks the submitted code against the most recent active one for the
/// phone number. A wrong code is a 200 with `verified: false` and the
/// remaining attempt count; only infrastructure failures are error statuses.
pub async fn verify_code<R, G, P>(
    state: web::Data<AppState<R, G, P>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        log::warn!(
            "Validation failed for verify-code request: {}",
            mask_phone_number(&request.phone)
        );
        return validation_error_response(&errors);
    }

    match state
        .otp_service
        .verify(&request.phone, &request.code)
        .await
    {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(VerifyCodeResponse {
            verified: outcome.success,
            message: outcome.error_message,
            attempts_remaining: outcome.remaining_attempts,
        })),
        Err(error) => domain_error_response(&error),
    }
}
