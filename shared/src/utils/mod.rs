//! Shared utility functions

pub mod phone;

pub use phone::{is_valid_phone, mask_phone_number, normalize_phone_number};
