//! Configuration system for quorum.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod mixture_config;
pub mod notification_config;
pub mod quorum_config;

pub use mixture_config::MixtureConfig;
pub use notification_config::NotificationConfig;
pub use quorum_config::{ConfigOverrides, QuorumConfig};
