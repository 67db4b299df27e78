//! Mock SMS gateway for tests and local development

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use gx_shared::utils::phone::mask_phone_number;

use super::traits::{SmsDelivery, SmsGateway, SmsGatewayError};

/// Mock gateway recording sent codes instead of delivering them
///
/// Can be switched into a failing mode to exercise send-failure handling.
pub struct MockSmsGateway {
    counter: AtomicU64,
    fail_sends: AtomicBool,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSmsGateway {
    /// Create a new mock gateway
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            fail_sends: AtomicBool::new(false),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make all subsequent sends fail
    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    /// All (phone, code) pairs sent so far (test helper)
    pub async fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().await.clone()
    }

    /// The code most recently sent to a phone (test helper)
    pub async fn last_code_for(&self, phone: &str) -> Option<String> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|(p, _)| p == phone)
            .map(|(_, code)| code.clone())
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send_otp(&self, phone: &str, code: &str) -> Result<SmsDelivery, SmsGatewayError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(SmsGatewayError::Network {
                provider: "Mock".to_string(),
                message: "simulated gateway failure".to_string(),
            });
        }

        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.sent
            .lock()
            .await
            .push((phone.to_string(), code.to_string()));

        info!(
            phone = %mask_phone_number(phone),
            message_id = id,
            "Mock SMS gateway accepted message"
        );

        Ok(SmsDelivery {
            message_id: format!("mock-{}", id),
            provider: "Mock".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
