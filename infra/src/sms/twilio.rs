//! Twilio SMS gateway adapter
//!
//! International route used when a student signs up from outside India.
//! Twilio wants E.164 recipients, so the canonical ten-digit number gets the
//! +91 prefix here.

use async_trait::async_trait;
use tracing::{debug, info};
use twilio::{Client, OutboundMessage};

use gx_core::services::otp::traits::{SmsDelivery, SmsGateway, SmsGatewayError};
use gx_shared::config::SmsConfig;
use gx_shared::utils::phone::mask_phone_number;

use crate::sms::otp_message;
use crate::InfrastructureError;

const PROVIDER: &str = "Twilio";

/// SMS gateway backed by the Twilio messaging API
pub struct TwilioGateway {
    client: Client,
    from_number: String,
}

impl TwilioGateway {
    /// Create the gateway, failing fast on missing credentials
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio selected but SMS_API_KEY (account SID) is not set".to_string(),
            ));
        }
        if config.api_secret.is_empty() {
            return Err(InfrastructureError::Config(
                "Twilio selected but SMS_API_SECRET (auth token) is not set".to_string(),
            ));
        }
        if !config.sender_id.starts_with('+') {
            return Err(InfrastructureError::Config(
                "Twilio selected but SMS_SENDER_ID is not an E.164 from number".to_string(),
            ));
        }

        let client = Client::new(&config.api_key, &config.api_secret);

        info!(
            from = %mask_phone_number(&config.sender_id),
            "Twilio SMS gateway initialized"
        );

        Ok(Self {
            client,
            from_number: config.sender_id.clone(),
        })
    }

    fn to_e164(phone: &str) -> String {
        if phone.starts_with('+') {
            phone.to_string()
        } else {
            format!("+91{}", phone)
        }
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError> {
        let to = Self::to_e164(phone);
        let body = otp_message(code);

        debug!(
            phone = %mask_phone_number(&to),
            "Requesting OTP delivery from Twilio"
        );

        let message = OutboundMessage::new(&self.from_number, &to, &body);
        let response = self
            .client
            .send_message(message)
            .await
            .map_err(|e| SmsGatewayError::Provider {
                provider: PROVIDER.to_string(),
                error_code: None,
                message: e.to_string(),
            })?;

        info!(
            phone = %mask_phone_number(&to),
            sid = %response.sid,
            "Twilio accepted OTP message"
        );

        Ok(SmsDelivery {
            message_id: response.sid,
            provider: PROVIDER.to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
