//! Activity-level estimates over a weekday's history.

use chrono::{Duration, NaiveDateTime, Weekday};
use quorum_core::constants::{END_OF_DAY, START_OF_DAY};
use quorum_core::errors::EstimationError;
use quorum_core::time::minutes_to_time;
use rand::Rng;
use tracing::debug;

use super::history::{weeks_spanned, ActivityHistory, StatusLabel};
use crate::estimators::{ActivityPrediction, PresenceEstimator};
use crate::occupancy::TimeRange;

/// Weekdays in report order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Probability the activity has started by `target`, one observation per
/// calendar date. `0.0` when nothing was ever started.
pub fn activity_probability<R: Rng>(
    estimator: &mut PresenceEstimator<R>,
    history: &ActivityHistory,
    target: &str,
    now: NaiveDateTime,
) -> Result<f64, EstimationError> {
    let starts = history.timestamps(StatusLabel::Start);
    if starts.is_empty() {
        return Ok(0.0);
    }
    let weeks = weeks_spanned(history, now);
    estimator.probability_by_unique_date(&starts, target, weeks)
}

/// Most likely start and end of the activity.
///
/// A side with no samples, or whose estimate fails, falls back to
/// `"00:00"` / `"23:59"`.
pub fn activity_time_range<R: Rng>(
    estimator: &mut PresenceEstimator<R>,
    history: &ActivityHistory,
    now: NaiveDateTime,
) -> TimeRange {
    let weeks = weeks_spanned(history, now);
    let mut side = |label: StatusLabel, fallback: &str| {
        let times = history.times(label);
        if times.is_empty() {
            return fallback.to_string();
        }
        match estimator.most_likely_time(&times, weeks) {
            Ok(minutes) => minutes_to_time(minutes),
            Err(e) => {
                debug!(?label, error = %e, "likely time unavailable, using default");
                fallback.to_string()
            }
        }
    };

    let start = side(StatusLabel::Start, START_OF_DAY);
    let end = side(StatusLabel::End, END_OF_DAY);
    TimeRange { start, end }
}

/// One summary per weekday, Sunday first, over the `start` samples of the
/// last `weeks` weeks up to `now`.
pub fn weekly_predictions<R: Rng>(
    estimator: &mut PresenceEstimator<R>,
    history: &ActivityHistory,
    target: &str,
    weeks: u32,
    now: NaiveDateTime,
) -> Result<Vec<ActivityPrediction>, EstimationError> {
    if weeks == 0 {
        return Err(EstimationError::InvalidWeeks { weeks });
    }
    let window = history.within(now - Duration::days(i64::from(weeks) * 7), now);
    WEEK.iter()
        .map(|&day| {
            let starts = window.for_weekday(day).times(StatusLabel::Start);
            estimator.summarize(day, &starts, target, weeks)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::history::ActivitySample;
    use chrono::NaiveDate;
    use quorum_core::config::MixtureConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn at(d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn estimator() -> PresenceEstimator<StdRng> {
        PresenceEstimator::with_rng(MixtureConfig::default(), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_probability_without_starts_is_zero() {
        let history = ActivityHistory::new(vec![ActivitySample::new(StatusLabel::End, at(6, 18, 0))]);
        let p = activity_probability(&mut estimator(), &history, "23:59", at(20, 0, 0)).unwrap();
        assert_eq!(p, 0.0);
    }

    #[test]
    fn test_probability_single_start() {
        // Oldest sample 2 weeks before now: weeks = 3.
        let history = ActivityHistory::new(vec![ActivitySample::new(StatusLabel::Start, at(6, 10, 0))]);
        let p = activity_probability(&mut estimator(), &history, "23:59", at(20, 12, 0)).unwrap();
        assert!((p - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_range_defaults() {
        let range = activity_time_range(&mut estimator(), &ActivityHistory::default(), at(20, 0, 0));
        assert_eq!(range, TimeRange::new("00:00", "23:59"));

        let history = ActivityHistory::new(vec![ActivitySample::new(StatusLabel::Start, at(6, 13, 15))]);
        let range = activity_time_range(&mut estimator(), &history, at(20, 0, 0));
        assert_eq!(range, TimeRange::new("13:15", "23:59"));
    }

    #[test]
    fn test_weekly_predictions_cover_week() {
        // 2024-05-06 and 2024-05-13 are Mondays.
        let history = ActivityHistory::new(vec![
            ActivitySample::new(StatusLabel::Start, at(6, 10, 0)),
            ActivitySample::new(StatusLabel::Start, at(13, 10, 0)),
        ]);
        let week = weekly_predictions(&mut estimator(), &history, "23:59", 2, at(13, 20, 0)).unwrap();
        assert_eq!(week.len(), 7);
        assert_eq!(week[0].weekday, Weekday::Sun);
        assert_eq!(week[0].data_point_count, 0);
        assert_eq!(week[1].weekday, Weekday::Mon);
        assert_eq!(week[1].data_point_count, 2);
        assert_eq!(week[1].most_likely_time.as_deref(), Some("10:00"));
        assert!((week[1].probability - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weekly_predictions_ignore_samples_before_window() {
        // Ten Monday starts from 2024-03-04; only the last four fall in a
        // four-week window.
        let first = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let history: ActivityHistory = (0..10)
            .map(|n| ActivitySample::new(StatusLabel::Start, first + Duration::weeks(n)))
            .collect();
        let now = first + Duration::weeks(9) + Duration::hours(8);

        let week = weekly_predictions(&mut estimator(), &history, "23:59", 4, now).unwrap();
        let monday = &week[1];
        assert_eq!(monday.data_point_count, 4);
        assert!((monday.probability - 1.0).abs() < 1e-12, "{}", monday.probability);
    }

    #[test]
    fn test_weekly_predictions_reject_zero_weeks() {
        let mut est = estimator();
        let result = weekly_predictions(&mut est, &ActivityHistory::default(), "23:59", 0, at(13, 20, 0));
        assert_eq!(result, Err(EstimationError::InvalidWeeks { weeks: 0 }));
    }
}
