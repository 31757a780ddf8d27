//! Error handling for quorum.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod estimation_error;
pub mod time_error;

pub use config_error::ConfigError;
pub use error_code::QuorumErrorCode;
pub use estimation_error::EstimationError;
pub use time_error::TimeError;
