//! From activity history and presence predictions to recommendations.

pub mod activity;
pub mod history;
pub mod planner;

pub use activity::{activity_probability, activity_time_range, weekly_predictions, WEEK};
pub use history::{weeks_spanned, ActivityHistory, ActivitySample, StatusLabel};
pub use planner::{
    ActivityContext, NotificationPlanner, PeopleForecast, PlanBatch, Recommendation,
};
