//! SMS gateway configuration

use serde::{Deserialize, Serialize};

/// SMS gateway configuration
///
/// The `provider` string selects the adapter ("msg91", "twilio", "textlocal",
/// "mock"). The credential fields are generic; each adapter documents which
/// of them it requires and refuses to construct without them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS gateway provider ("msg91", "twilio", "textlocal", "mock")
    pub provider: String,

    /// API key / account identifier
    /// (MSG91 authkey, Twilio account SID, TextLocal API key)
    pub api_key: String,

    /// API secret/token (Twilio auth token; unused by MSG91 and TextLocal)
    pub api_secret: String,

    /// Sender identity
    /// (Twilio from number, MSG91/TextLocal 6-char sender ID)
    pub sender_id: String,

    /// Provider template identifier (MSG91 OTP template)
    #[serde(default)]
    pub template_id: String,

    /// Timeout for provider API requests in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            api_key: String::new(),
            api_secret: String::new(),
            sender_id: "GOVEXM".to_string(),
            template_id: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SmsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            api_key: std::env::var("SMS_API_KEY").unwrap_or_default(),
            api_secret: std::env::var("SMS_API_SECRET").unwrap_or_default(),
            sender_id: std::env::var("SMS_SENDER_ID").unwrap_or_else(|_| "GOVEXM".to_string()),
            template_id: std::env::var("SMS_TEMPLATE_ID").unwrap_or_default(),
            request_timeout_secs: std::env::var("SMS_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}
