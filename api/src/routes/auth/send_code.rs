use actix_web::{web, HttpResponse};
use validator::Validate;

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::types::response::ApiResponse;
use gx_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{domain_error_response, validation_error_response};
use crate::routes::AppState;

/// Handler for POST /api/v1/auth/send-code
///
/// Generates a verification code for the phone number and hands it to the
/// configured SMS gateway. Rate-limit denials come back as 429 with the
/// wait time in the error details.
pub async fn send_code<R, G, P>(
    state: web::Data<AppState<R, G, P>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    if let Err(errors) = request.0.validate() {
        log::warn!(
            "Validation failed for send-code request: {}",
            mask_phone_number(&request.phone)
        );
        return validation_error_response(&errors);
    }

    match state.otp_service.send(&request.phone).await {
        Ok(outcome) => HttpResponse::Ok().json(ApiResponse::success(SendCodeResponse {
            message: "Verification code sent successfully".to_string(),
            provider: outcome.provider,
            next_resend_at: outcome.next_resend_at,
            attempts_remaining: outcome.remaining_attempts,
        })),
        Err(error) => domain_error_response(&error),
    }
}
