//! QuorumErrorCode trait for structured error reporting.

/// Stable, machine-readable error codes for collaborators that surface
/// engine failures (chat responses, HTTP handlers).
pub trait QuorumErrorCode {
    /// Returns the error code string (e.g., "NO_DATA").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const TIME_FORMAT_ERROR: &str = "TIME_FORMAT_ERROR";
pub const NO_DATA: &str = "NO_DATA";
pub const ESTIMATION_ERROR: &str = "ESTIMATION_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
