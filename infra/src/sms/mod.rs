//! SMS gateway module
//!
//! Provider adapters implementing the domain's `SmsGateway` trait, plus the
//! factory selecting one from configuration. Supported providers are MSG91
//! and TextLocal (the Indian DLT-registered routes) and Twilio. Selecting a
//! provider whose credentials are missing is a startup error, never a silent
//! fallback; the mock gateway must be asked for by name.

pub mod msg91;
pub mod textlocal;
pub mod twilio;

pub use msg91::Msg91Gateway;
pub use textlocal::TextLocalGateway;
pub use twilio::TwilioGateway;


use gx_core::services::otp::mock::MockSmsGateway;
use gx_core::services::otp::traits::SmsGateway;
use gx_shared::config::SmsConfig;

use crate::InfrastructureError;

/// Body of the OTP SMS as registered with the DLT template
pub(crate) fn otp_message(code: &str) -> String {
    format!(
        "{} is your GovExams verification code. Valid for 10 minutes. Do not share it with anyone.",
        code
    )
}

/// Prefix a canonical ten-digit Indian mobile with the country code
pub(crate) fn with_country_code(phone: &str) -> String {
    if phone.starts_with("91") && phone.len() == 12 {
        phone.to_string()
    } else {
        format!("91{}", phone)
    }
}

/// Create the SMS gateway selected by configuration
///
/// Fails fast when the selected provider's credentials are absent or the
/// provider name is unknown.
pub fn create_sms_gateway(
    config: &SmsConfig,
) -> Result<Box<dyn SmsGateway>, InfrastructureError> {
    match config.provider.as_str() {
        "msg91" => Ok(Box::new(Msg91Gateway::new(config)?)),
        "textlocal" => Ok(Box::new(TextLocalGateway::new(config)?)),
        "twilio" => Ok(Box::new(TwilioGateway::new(config)?)),
        "mock" => {
            tracing::warn!("Using mock SMS gateway; no messages will be delivered");
            Ok(Box::new(MockSmsGateway::new()))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown SMS provider '{}'; expected msg91, textlocal, twilio or mock",
            other
        ))),
    }
}
