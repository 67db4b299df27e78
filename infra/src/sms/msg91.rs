//! MSG91 SMS gateway adapter
//!
//! Delivers verification codes through the MSG91 OTP API. MSG91 is the
//! primary route for Indian numbers; it takes the authkey in a request
//! header and the registered DLT template id in the query string.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use gx_core::services::otp::traits::{SmsDelivery, SmsGateway, SmsGatewayError};
use gx_shared::config::SmsConfig;
use gx_shared::utils::phone::mask_phone_number;

use crate::sms::with_country_code;
use crate::InfrastructureError;

const PROVIDER: &str = "MSG91";
const OTP_ENDPOINT: &str = "https://control.msg91.com/api/v5/otp";

/// MSG91 OTP API response
#[derive(Debug, Deserialize)]
struct Msg91Response {
    /// "success" or "error"
    #[serde(rename = "type")]
    kind: String,
    /// Request id on success, error description on failure
    #[serde(default)]
    message: String,
}

/// SMS gateway backed by the MSG91 OTP API
pub struct Msg91Gateway {
    client: reqwest::Client,
    auth_key: String,
    template_id: String,
}

impl Msg91Gateway {
    /// Create the gateway, failing fast on missing credentials
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "MSG91 selected but SMS_API_KEY (authkey) is not set".to_string(),
            ));
        }
        if config.template_id.is_empty() {
            return Err(InfrastructureError::Config(
                "MSG91 selected but SMS_TEMPLATE_ID is not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(InfrastructureError::Http)?;

        info!("MSG91 SMS gateway initialized");

        Ok(Self {
            client,
            auth_key: config.api_key.clone(),
            template_id: config.template_id.clone(),
        })
    }
}

#[async_trait]
impl SmsGateway for Msg91Gateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError> {
        let mobile = with_country_code(phone);

        debug!(
            phone = %mask_phone_number(phone),
            "Requesting OTP delivery from MSG91"
        );

        let response = self
            .client
            .post(OTP_ENDPOINT)
            .header("authkey", &self.auth_key)
            .query(&[
                ("template_id", self.template_id.as_str()),
                ("mobile", mobile.as_str()),
                ("otp", code),
            ])
            .send()
            .await
            .map_err(|e| SmsGatewayError::Network {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body: Msg91Response =
            response.json().await.map_err(|e| SmsGatewayError::Network {
                provider: PROVIDER.to_string(),
                message: format!("Invalid response body: {}", e),
            })?;

        if !status.is_success() || body.kind != "success" {
            return Err(SmsGatewayError::Provider {
                provider: PROVIDER.to_string(),
                error_code: Some(status.as_u16().to_string()),
                message: body.message,
            });
        }

        info!(
            phone = %mask_phone_number(phone),
            request_id = %body.message,
            "MSG91 accepted OTP message"
        );

        Ok(SmsDelivery {
            message_id: body.message,
            provider: PROVIDER.to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
