//! Validation, notices and formatting helpers.

pub mod format;
pub mod message;
pub mod validate;

pub use format::{format_amount, format_datetime, truncate_string};
