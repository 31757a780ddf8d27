//! # quorum-core
//!
//! Shared foundation for the quorum forecasting engine: the `"HH:MM"` time
//! codec, one error enum per subsystem, TOML configuration with layered
//! resolution, tracing setup, and default constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod time;
pub mod tracing;

pub use config::{MixtureConfig, NotificationConfig, QuorumConfig};
pub use errors::{ConfigError, EstimationError, QuorumErrorCode, TimeError};
pub use time::{minutes_to_time, parse_timestamp, time_to_minutes, Minutes};
