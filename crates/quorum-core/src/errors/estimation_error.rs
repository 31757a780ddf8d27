//! Estimation errors.

use super::error_code::{self, QuorumErrorCode};
use super::TimeError;

/// Errors that abort a single probability or likely-time computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimationError {
    #[error("no data provided")]
    NoData,

    #[error("weeks must be at least 1, got {weeks}")]
    InvalidWeeks { weeks: u32 },

    #[error("Time error: {0}")]
    Time(#[from] TimeError),
}

impl QuorumErrorCode for EstimationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoData => error_code::NO_DATA,
            Self::InvalidWeeks { .. } => error_code::ESTIMATION_ERROR,
            Self::Time(e) => e.error_code(),
        }
    }
}
