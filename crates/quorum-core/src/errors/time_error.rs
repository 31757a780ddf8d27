//! Wall-clock parsing errors.

use super::error_code::{self, QuorumErrorCode};

/// Errors raised while decoding `"HH:MM"` or `"YYYY-MM-DD HH:MM"` strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    #[error("invalid time format: {input}")]
    InvalidFormat { input: String },

    #[error("invalid hours: {part}")]
    InvalidHours { part: String },

    #[error("invalid minutes: {part}")]
    InvalidMinutes { part: String },

    #[error("invalid timestamp: {input}")]
    InvalidTimestamp { input: String },
}

impl QuorumErrorCode for TimeError {
    fn error_code(&self) -> &'static str {
        error_code::TIME_FORMAT_ERROR
    }
}
