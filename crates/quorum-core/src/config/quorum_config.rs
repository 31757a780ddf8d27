//! Top-level quorum configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{MixtureConfig, NotificationConfig};
use crate::errors::ConfigError;
use crate::time::time_to_minutes;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`QUORUM_*`)
/// 3. Project config (`quorum.toml` in the project root)
/// 4. User config (`~/.quorum/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct QuorumConfig {
    pub mixture: MixtureConfig,
    pub notification: NotificationConfig,
}

/// Caller-supplied overrides, applied last.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub max_components: Option<usize>,
    pub activity_threshold: Option<f64>,
    pub attendee_threshold: Option<f64>,
    pub cutoff_time: Option<String>,
}

impl QuorumConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("quorum.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config)?;

        // Layer 1 (highest priority): explicit overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &QuorumConfig) -> Result<(), ConfigError> {
        let m = &config.mixture;
        if m.max_components == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mixture.max_components".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if m.max_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "mixture.max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, value) in [
            ("mixture.tolerance", m.tolerance),
            ("mixture.variance_floor", m.variance_floor),
        ] {
            if let Some(v) = value {
                if !(v > 0.0 && v.is_finite()) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a positive finite number".to_string(),
                    });
                }
            }
        }

        let n = &config.notification;
        for (field, value) in [
            ("notification.activity_threshold", n.activity_threshold),
            ("notification.attendee_threshold", n.attendee_threshold),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be between 0.0 and 1.0".to_string(),
                    });
                }
            }
        }
        if let Some(ref cutoff) = n.cutoff_time {
            time_to_minutes(cutoff).map_err(|e| ConfigError::ValidationFailed {
                field: "notification.cutoff_time".to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Returns the user config path: `~/.quorum/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".quorum").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut QuorumConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QuorumConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut QuorumConfig, other: &QuorumConfig) {
        // Mixture
        if other.mixture.max_components.is_some() {
            base.mixture.max_components = other.mixture.max_components;
        }
        if other.mixture.max_iterations.is_some() {
            base.mixture.max_iterations = other.mixture.max_iterations;
        }
        if other.mixture.tolerance.is_some() {
            base.mixture.tolerance = other.mixture.tolerance;
        }
        if other.mixture.variance_floor.is_some() {
            base.mixture.variance_floor = other.mixture.variance_floor;
        }
        if other.mixture.seed.is_some() {
            base.mixture.seed = other.mixture.seed;
        }

        // Notification
        if other.notification.activity_threshold.is_some() {
            base.notification.activity_threshold = other.notification.activity_threshold;
        }
        if other.notification.attendee_threshold.is_some() {
            base.notification.attendee_threshold = other.notification.attendee_threshold;
        }
        if other.notification.cutoff_time.is_some() {
            base.notification.cutoff_time = other.notification.cutoff_time.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `QUORUM_MIXTURE_SEED`, `QUORUM_NOTIFICATION_ACTIVITY_THRESHOLD`, etc.
    fn apply_env_overrides(config: &mut QuorumConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<u64>("QUORUM_MIXTURE_SEED")? {
            config.mixture.seed = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUORUM_MIXTURE_MAX_COMPONENTS")? {
            config.mixture.max_components = Some(v);
        }
        if let Some(v) = env_parse::<usize>("QUORUM_MIXTURE_MAX_ITERATIONS")? {
            config.mixture.max_iterations = Some(v);
        }
        if let Some(v) = env_parse::<f64>("QUORUM_NOTIFICATION_ACTIVITY_THRESHOLD")? {
            config.notification.activity_threshold = Some(v);
        }
        if let Some(v) = env_parse::<f64>("QUORUM_NOTIFICATION_ATTENDEE_THRESHOLD")? {
            config.notification.attendee_threshold = Some(v);
        }
        if let Ok(val) = std::env::var("QUORUM_NOTIFICATION_CUTOFF_TIME") {
            config.notification.cutoff_time = Some(val);
        }
        Ok(())
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut QuorumConfig, o: &ConfigOverrides) {
        if let Some(v) = o.seed {
            config.mixture.seed = Some(v);
        }
        if let Some(v) = o.max_components {
            config.mixture.max_components = Some(v);
        }
        if let Some(v) = o.activity_threshold {
            config.notification.activity_threshold = Some(v);
        }
        if let Some(v) = o.attendee_threshold {
            config.notification.attendee_threshold = Some(v);
        }
        if let Some(ref v) = o.cutoff_time {
            config.notification.cutoff_time = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Read and parse an environment variable; unset means `None`.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(val) => val.parse::<T>().map(Some).map_err(|_| ConfigError::InvalidValue {
            field: key.to_string(),
            message: format!("cannot parse {val:?}"),
        }),
        Err(_) => Ok(None),
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
