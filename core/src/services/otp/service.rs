//! Main OTP service implementation

use chrono::{Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use std::sync::Arc;
use tracing::{error, info, warn};

use gx_shared::config::{OtpConfig, RateLimitConfig};
use gx_shared::utils::phone::{canonical_phone, is_valid_phone, mask_phone_number};

use crate::domain::entities::otp_record::{OtpRecord, CODE_LENGTH};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::otp::r#trait::OtpRepository;
use crate::services::rate_limit::limiter::{RateLimitDecision, SlidingWindowLimiter};

use super::traits::SmsGateway;
use super::types::{SendOutcome, VerifyOutcome};

/// OTP service handling code issuance and verification
pub struct OtpService<R: OtpRepository, G: SmsGateway> {
    repository: Arc<R>,
    gateway: Arc<G>,
    limiter: SlidingWindowLimiter<R>,
    otp_config: OtpConfig,
    rate_limit_config: RateLimitConfig,
}

impl<R: OtpRepository, G: SmsGateway> OtpService<R, G> {
    /// Create a new OTP service
    pub fn new(
        repository: Arc<R>,
        gateway: Arc<G>,
        otp_config: OtpConfig,
        rate_limit_config: RateLimitConfig,
    ) -> Self {
        let limiter = SlidingWindowLimiter::new(repository.clone(), rate_limit_config.clone());
        Self {
            repository,
            gateway,
            limiter,
            otp_config,
            rate_limit_config,
        }
    }

    /// Send a verification code to a phone number
    ///
    /// Validates the phone, consults the rate limiter (a denial surfaces the
    /// limiter's message and wait time verbatim), persists a fresh code and
    /// hands it to the SMS gateway. If the gateway fails, the just-persisted
    /// record is deleted so the failed send neither leaves a dangling code
    /// nor burns a rate-limit slot.
    pub async fn send(&self, phone: &str) -> DomainResult<SendOutcome> {
        if !is_valid_phone(phone) {
            warn!(
                phone = %mask_phone_number(phone),
                event = "invalid_phone",
                "Rejected OTP send for malformed phone number"
            );
            return Err(OtpError::InvalidPhoneFormat.into());
        }
        let phone = canonical_phone(phone);

        let remaining_attempts = match self.limiter.check(&phone).await {
            RateLimitDecision::Allowed { remaining_attempts } => remaining_attempts,
            RateLimitDecision::Limited {
                retry_after_seconds,
                message,
            } => {
                return Err(OtpError::RateLimited {
                    retry_after_seconds,
                    message,
                }
                .into());
            }
        };

        let code = Self::generate_code();
        let record = OtpRecord::new_with_expiration(
            phone.clone(),
            code.clone(),
            self.otp_config.expiration_minutes,
        );
        self.repository.create(&record).await?;

        info!(
            phone = %mask_phone_number(&phone),
            record_id = %record.id,
            event = "otp_generated",
            "Generated verification code"
        );

        let delivery = match self.gateway.send_otp(&phone, &code).await {
            Ok(delivery) => delivery,
            Err(e) => {
                error!(
                    phone = %mask_phone_number(&phone),
                    provider = self.gateway.provider_name(),
                    error = %e,
                    event = "otp_send_failed",
                    "SMS gateway failed to deliver verification code"
                );
                // Roll back the unsent code; a stale row would cost the user
                // a rate-limit slot for a code that never reached them.
                if let Err(del_err) = self.repository.delete(record.id).await {
                    warn!(
                        record_id = %record.id,
                        error = %del_err,
                        "Failed to remove undelivered OTP record"
                    );
                }
                return Err(OtpError::SmsFailure {
                    message: e.to_string(),
                }
                .into());
            }
        };

        info!(
            phone = %mask_phone_number(&phone),
            provider = %delivery.provider,
            message_id = %delivery.message_id,
            event = "otp_sent",
            "Verification code sent"
        );

        Ok(SendOutcome {
            message_id: delivery.message_id,
            provider: delivery.provider,
            next_resend_at: Utc::now()
                + Duration::seconds(self.rate_limit_config.cooldown_seconds as i64),
            remaining_attempts: remaining_attempts.saturating_sub(1),
        })
    }

    /// Verify a submitted code against the most recent active record
    ///
    /// Verification failures (wrong code, expired, exhausted attempts) are
    /// ordinary outcomes; only storage errors surface as `Err`.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerifyOutcome> {
        let phone = canonical_phone(phone);

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            warn!(
                phone = %mask_phone_number(&phone),
                code_length = code.len(),
                event = "invalid_code_format",
                "Malformed verification code submitted"
            );
            return Ok(VerifyOutcome::rejected(
                "Invalid verification code format",
                None,
            ));
        }

        let record = match self.repository.find_latest_active(&phone).await? {
            Some(record) => record,
            None => {
                warn!(
                    phone = %mask_phone_number(&phone),
                    event = "otp_not_found",
                    "No active verification code for phone number"
                );
                return Ok(VerifyOutcome::rejected(
                    "Verification code has expired or was never sent. Please request a new code",
                    None,
                ));
            }
        };

        if record.attempts >= self.otp_config.max_verify_attempts {
            warn!(
                phone = %mask_phone_number(&phone),
                record_id = %record.id,
                event = "max_attempts_exceeded",
                "Verification attempts exhausted for code"
            );
            return Ok(VerifyOutcome::rejected(
                "Maximum verification attempts exceeded. Please request a new code",
                Some(0),
            ));
        }

        if record.code_matches(code) {
            self.repository.mark_used(record.id).await?;
            info!(
                phone = %mask_phone_number(&phone),
                record_id = %record.id,
                event = "otp_verified",
                "Verification code accepted"
            );
            return Ok(VerifyOutcome::verified());
        }

        let attempts = self.repository.increment_attempts(record.id).await?;
        let remaining = (self.otp_config.max_verify_attempts - attempts).max(0);

        warn!(
            phone = %mask_phone_number(&phone),
            record_id = %record.id,
            remaining_attempts = remaining,
            event = "otp_verification_failed",
            "Verification code mismatch"
        );

        let message = if remaining > 0 {
            format!("Invalid verification code. {} attempt(s) remaining", remaining)
        } else {
            "Maximum verification attempts exceeded. Please request a new code".to_string()
        };

        Ok(VerifyOutcome::rejected(message, Some(remaining)))
    }

    /// Generate a uniformly random zero-padded 6-digit code using the OS
    /// CSPRNG
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        let mut bytes = [0u8; 4];
        rng.fill_bytes(&mut bytes);
        let num = u32::from_le_bytes(bytes);
        // Modulo bias over 2^32 is negligible for a 6-digit code
        format!("{:06}", num % 1_000_000)
    }
}
