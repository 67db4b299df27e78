//! TextLocal SMS gateway adapter
//!
//! Fallback route for Indian numbers. TextLocal takes a form-encoded POST
//! with the API key, recipient list and sender id.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use gx_core::services::otp::traits::{SmsDelivery, SmsGateway, SmsGatewayError};
use gx_shared::config::SmsConfig;
use gx_shared::utils::phone::mask_phone_number;

use crate::sms::{otp_message, with_country_code};
use crate::InfrastructureError;

const PROVIDER: &str = "TextLocal";
const SEND_ENDPOINT: &str = "https://api.textlocal.in/send/";

#[derive(Debug, Deserialize)]
struct TextLocalMessage {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct TextLocalError {
    code: i32,
    message: String,
}

/// TextLocal send API response
#[derive(Debug, Deserialize)]
struct TextLocalResponse {
    /// "success" or "failure"
    status: String,
    #[serde(default)]
    messages: Vec<TextLocalMessage>,
    #[serde(default)]
    errors: Vec<TextLocalError>,
}

/// SMS gateway backed by the TextLocal send API
pub struct TextLocalGateway {
    client: reqwest::Client,
    api_key: String,
    sender_id: String,
}

impl TextLocalGateway {
    /// Create the gateway, failing fast on missing credentials
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "TextLocal selected but SMS_API_KEY is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!(sender_id = %config.sender_id, "TextLocal SMS gateway initialized");

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for TextLocalGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError> {
        let numbers = with_country_code(phone);
        let message = otp_message(code);

        debug!(
            phone = %mask_phone_number(phone),
            "Requesting OTP delivery from TextLocal"
        );

        let response = self
            .client
            .post(SEND_ENDPOINT)
            .form(&[
                ("apikey", self.api_key.as_str()),
                ("numbers", numbers.as_str()),
                ("sender", self.sender_id.as_str()),
                ("message", message.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SmsGatewayError::Network {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        let body: TextLocalResponse =
            response.json().await.map_err(|e| SmsGatewayError::Network {
                provider: PROVIDER.to_string(),
                message: format!("Invalid response body: {}", e),
            })?;

        if body.status != "success" {
            let (error_code, message) = body
                .errors
                .first()
                .map(|e| (Some(e.code.to_string()), e.message.clone()))
                .unwrap_or((None, "Unknown TextLocal error".to_string()));
            return Err(SmsGatewayError::Provider {
                provider: PROVIDER.to_string(),
                error_code,
                message,
            });
        }

        let message_id = body
            .messages
            .first()
            .map(|m| m.id.to_string())
            .unwrap_or_default();

        info!(
            phone = %mask_phone_number(phone),
            message_id = %message_id,
            "TextLocal accepted OTP message"
        );

        Ok(SmsDelivery {
            message_id,
            provider: PROVIDER.to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
