//! Shared constants for the quorum forecasting engine.

/// Minutes in one day.
pub const MINUTES_PER_DAY: i32 = 1440;

/// Earliest wall-clock time of the day.
pub const START_OF_DAY: &str = "00:00";

/// Latest wall-clock time of the day. Open occupancy windows close here.
pub const END_OF_DAY: &str = "23:59";

/// Timestamp layout used for dated samples.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// ---- Mixture estimation ----

/// Largest component count tried during model selection.
pub const DEFAULT_MAX_COMPONENTS: usize = 4;

/// EM iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// EM convergence tolerance on the change in log-likelihood.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Lower bound for component variances.
pub const DEFAULT_VARIANCE_FLOOR: f64 = 1e-6;

/// Initial variance used when the sample variance is degenerate.
pub const FALLBACK_VARIANCE: f64 = 1.0;

/// Components with less responsibility mass than this keep their parameters.
pub const MIN_COMPONENT_MASS: f64 = 1e-10;

// ---- Notification planning ----

/// Minimum activity probability before an activity is considered.
pub const DEFAULT_ACTIVITY_THRESHOLD: f64 = 0.30;

/// Minimum per-person presence probability to count as a likely attendee.
pub const DEFAULT_ATTENDEE_THRESHOLD: f64 = 0.30;

/// Target time used when asking "will the activity happen at all today".
pub const DEFAULT_CUTOFF_TIME: &str = END_OF_DAY;
