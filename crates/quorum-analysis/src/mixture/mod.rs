//! Gaussian mixture clustering of minute-of-day samples.
//!
//! - [`gaussian`]: the 1-D mixture and its EM fit
//! - [`seeding`]: k-means++ initial means
//! - [`selection`]: BIC model selection and partitioning into [`Cluster`]s
//!
//! Randomness enters only through the `rand::Rng` passed to the fit, so a
//! seeded generator makes every result reproducible.

pub mod gaussian;
pub mod seeding;
pub mod selection;

pub use gaussian::GaussianMixture;
pub use selection::{cluster, partition, select_model, Cluster, ModelSelection};
