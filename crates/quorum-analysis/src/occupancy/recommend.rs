//! Intersect occupancy windows with an activity's typical time range.

use quorum_core::time::{minutes_to_time, time_to_minutes, Minutes};
use tracing::warn;

use super::sweep::TimeRange;

fn bounds(range: &TimeRange) -> Option<(Minutes, Minutes)> {
    match (time_to_minutes(&range.start), time_to_minutes(&range.end)) {
        (Ok(start), Ok(end)) => Some((start, end)),
        (Err(e), _) | (_, Err(e)) => {
            warn!(start = %range.start, end = %range.end, error = %e, "malformed time range");
            None
        }
    }
}

/// Overlap of `activity` with each occupancy range, strictly non-empty only.
///
/// Touching ranges do not overlap. A malformed activity range yields no
/// ranges; malformed occupancy ranges are skipped.
pub fn intersect(activity: &TimeRange, occupancy: &[TimeRange]) -> Vec<TimeRange> {
    let Some((activity_start, activity_end)) = bounds(activity) else {
        return Vec::new();
    };

    occupancy
        .iter()
        .filter_map(bounds)
        .filter_map(|(start, end)| {
            let overlap_start = activity_start.max(start);
            let overlap_end = activity_end.min(end);
            (overlap_start < overlap_end).then(|| {
                TimeRange::new(minutes_to_time(overlap_start), minutes_to_time(overlap_end))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlap() {
        let activity = TimeRange::new("13:00", "18:00");
        let occupancy = vec![
            TimeRange::new("10:00", "14:30"),
            TimeRange::new("17:00", "23:59"),
        ];
        assert_eq!(
            intersect(&activity, &occupancy),
            vec![
                TimeRange::new("13:00", "14:30"),
                TimeRange::new("17:00", "18:00"),
            ]
        );
    }

    #[test]
    fn test_malformed_activity_yields_nothing() {
        let activity = TimeRange::new("1pm", "18:00");
        assert!(intersect(&activity, &[TimeRange::new("10:00", "20:00")]).is_empty());
    }

    #[test]
    fn test_malformed_occupancy_skipped() {
        let activity = TimeRange::new("09:00", "17:00");
        let occupancy = vec![
            TimeRange::new("10:00", "??"),
            TimeRange::new("11:00", "12:00"),
        ];
        assert_eq!(
            intersect(&activity, &occupancy),
            vec![TimeRange::new("11:00", "12:00")]
        );
    }

    #[test]
    fn test_output_is_normalized() {
        let activity = TimeRange::new("9:5", "17:00");
        assert_eq!(
            intersect(&activity, &[TimeRange::new("08:00", "10:00")]),
            vec![TimeRange::new("09:05", "10:00")]
        );
    }
}
