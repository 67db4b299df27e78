//! OTP send rate limiting
//!
//! The limiter derives its sliding window and cooldown from persisted OTP
//! rows rather than a separate counter store.

pub mod limiter;

pub use limiter::{RateLimitDecision, SlidingWindowLimiter};
