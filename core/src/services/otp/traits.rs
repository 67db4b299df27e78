//! SMS gateway capability trait
//!
//! Provider adapters (MSG91, Twilio, TextLocal, mock) live in the
//! infrastructure crate and normalize each provider's response shape into
//! `SmsDelivery` / `SmsGatewayError`.

use async_trait::async_trait;
use thiserror::Error;

/// Normalized successful delivery result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsDelivery {
    /// Provider-assigned message identifier
    pub message_id: String,
    /// Name of the provider that accepted the message
    pub provider: String,
}

/// Normalized gateway failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmsGatewayError {
    /// The provider accepted the request but rejected the message
    #[error("{provider} rejected the message: {message}")]
    Provider {
        provider: String,
        /// Provider-specific error code, when one was returned
        error_code: Option<String>,
        message: String,
    },

    /// The provider could not be reached
    #[error("Network error calling {provider}: {message}")]
    Network { provider: String, message: String },
}

/// Capability trait implemented per SMS provider
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver an OTP code to a phone number
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError>;

    /// Name of the underlying provider (e.g. "MSG91", "Twilio")
    fn provider_name(&self) -> &str;
}

// The gateway is selected from configuration at startup, so callers usually
// hold a boxed trait object.
#[async_trait]
impl SmsGateway for Box<dyn SmsGateway> {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError> {
        (**self).send_otp(phone, code).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
