//! Mapping from domain errors to HTTP responses
//!
//! Every error leaves the API as an `ErrorResponse` envelope with a stable
//! error code. User mistakes are 4xx, a broken SMS route is 503, storage
//! failures are an opaque 500 with the cause kept in the logs.

use actix_web::HttpResponse;
use validator::ValidationErrors;

use gx_core::errors::{DomainError, OtpError};
use gx_shared::errors::{error_codes, ErrorResponse};

/// Convert a domain error into its HTTP response
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp) => otp_error_response(otp),
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message)),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::Database { message } => {
            log::error!("Database error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::DATABASE_ERROR,
                "A storage error occurred. Please try again later",
            ))
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

fn otp_error_response(error: &OtpError) -> HttpResponse {
    let body = ErrorResponse::from(error);
    match error {
        OtpError::RateLimited { .. } => HttpResponse::TooManyRequests().json(body),
        OtpError::SmsFailure { message } => {
            log::error!("SMS gateway failure: {}", message);
            // The provider detail stays in the logs
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SMS_ERROR,
                "Could not send the verification SMS. Please try again later",
            ))
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Convert validator failures into a 400 with per-field messages
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field, messages);
    }

    HttpResponse::BadRequest().json(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn rate_limited_maps_to_429() {
        let error = DomainError::Otp(OtpError::RateLimited {
            retry_after_seconds: 60,
            message: "wait".to_string(),
        });
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn sms_failure_maps_to_503() {
        let error = DomainError::Otp(OtpError::SmsFailure {
            message: "provider down".to_string(),
        });
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = DomainError::NotFound {
            resource: "plan".to_string(),
        };
        assert_eq!(domain_error_response(&error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn database_error_maps_to_500() {
        let error = DomainError::database("connection refused");
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_phone_maps_to_400() {
        let error = DomainError::Otp(OtpError::InvalidPhoneFormat);
        assert_eq!(
            domain_error_response(&error).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
