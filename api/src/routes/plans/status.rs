use actix_web::{web, HttpResponse};
use uuid::Uuid;

use gx_core::repositories::otp::r#trait::OtpRepository;
use gx_core::repositories::plan::r#trait::PlanRepository;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::errors::{error_codes, ErrorResponse};
use gx_shared::types::response::ApiResponse;

use crate::dto::plan::{PlanResponse, PlanStatusRequest};
use crate::handlers::domain_error_response;
use crate::routes::AppState;

/// Handler for PATCH /api/v1/plans/{id}/status
///
/// Operator endpoint toggling a plan's active flag. Deactivation takes
/// effect on the next entitlement check; there is no cache to invalidate.
pub async fn set_status<R, G, P>(
    state: web::Data<AppState<R, G, P>>,
    path: web::Path<String>,
    request: web::Json<PlanStatusRequest>,
) -> HttpResponse
where
    R: OtpRepository + 'static,
    G: SmsGateway + 'static,
    P: PlanRepository + 'static,
{
    let plan_id = match Uuid::parse_str(&path.into_inner()) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::BAD_REQUEST,
                "Plan id must be a UUID",
            ));
        }
    };

    match state
        .entitlement_service
        .set_plan_status(plan_id, request.is_active)
        .await
    {
        Ok(plan) => HttpResponse::Ok().json(ApiResponse::success(PlanResponse::from(plan))),
        Err(error) => domain_error_response(&error),
    }
}
