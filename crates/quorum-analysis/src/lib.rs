//! # quorum-analysis
//!
//! Statistical prediction engine for recurring group activities.
//!
//! - [`mixture`]: 1-D Gaussian mixture fit by EM, BIC model selection
//! - [`estimators`]: arrival probability and most likely time
//! - [`occupancy`]: joint-occupancy sweep and intersection with the
//!   activity range
//! - [`forecast`]: history handling and the per-activity recommendation
//!   pipeline

pub mod estimators;
pub mod forecast;
pub mod mixture;
pub mod occupancy;

pub use estimators::{
    most_likely_time, probability_of_presence_by, ActivityPrediction, PresenceEstimator,
};
pub use forecast::{
    ActivityContext, ActivityHistory, ActivitySample, NotificationPlanner, PeopleForecast,
    PlanBatch, Recommendation, StatusLabel,
};
pub use mixture::{Cluster, GaussianMixture};
pub use occupancy::{find_overlapping_ranges, intersect, PersonPrediction, TimeRange};
