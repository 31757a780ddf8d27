//! End-to-end recommendation planning.

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use quorum_analysis::forecast::{
    ActivityContext, ActivityHistory, ActivitySample, NotificationPlanner, PeopleForecast,
    StatusLabel,
};
use quorum_analysis::occupancy::{PersonPrediction, PersonProbability, PresenceEstimate, TimeRange};
use quorum_core::config::{MixtureConfig, NotificationConfig};
use quorum_core::errors::{EstimationError, TimeError};

fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, d)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

/// Started at 10:00 and ended at 17:00 on each Monday of May 2024.
fn monday_history() -> ActivityHistory {
    [6, 13, 20, 27]
        .into_iter()
        .flat_map(|d| {
            [
                ActivitySample::new(StatusLabel::Start, at(d, 10, 0)),
                ActivitySample::new(StatusLabel::End, at(d, 17, 0)),
            ]
        })
        .collect()
}

fn activity(id: u64, history: ActivityHistory) -> ActivityContext {
    ActivityContext {
        activity_id: id,
        name: format!("activity-{id}"),
        min_quorum: 2,
        members: vec![1, 2, 3],
        history,
    }
}

fn monday_people() -> PeopleForecast {
    PeopleForecast {
        weekday: Weekday::Mon,
        probabilities: vec![
            PersonProbability { person_id: 1, probability: 0.9 },
            PersonProbability { person_id: 2, probability: 0.8 },
            PersonProbability { person_id: 3, probability: 0.1 },
            PersonProbability { person_id: 99, probability: 0.99 },
        ],
        visits: vec![
            PresenceEstimate::new(1, "09:00"),
            PresenceEstimate::new(2, "11:00"),
            PresenceEstimate::new(3, "10:00"),
            PresenceEstimate::new(99, "10:00"),
        ],
        departures: vec![
            PresenceEstimate::new(1, "18:00"),
            PresenceEstimate::new(2, "15:00"),
            PresenceEstimate::new(3, "12:00"),
            PresenceEstimate::new(99, "20:00"),
        ],
    }
}

fn planner() -> NotificationPlanner {
    NotificationPlanner::new(NotificationConfig::default(), MixtureConfig::seeded(7))
}

#[test]
fn test_plan_recommends_overlap_within_activity_range() {
    let now = at(27, 20, 0);
    let rec = planner()
        .plan(&activity(1, monday_history()), &monday_people(), now)
        .unwrap()
        .expect("recommendation");

    assert_eq!(rec.activity_id, 1);
    assert_eq!(rec.activity_name, "activity-1");
    assert_eq!(rec.ranges, vec![TimeRange::new("11:00", "15:00")]);
    assert_eq!(
        rec.attendees,
        vec![
            PersonPrediction::new(1, "09:00", "18:00"),
            PersonPrediction::new(2, "11:00", "15:00"),
        ]
    );
}

#[test]
fn test_plan_skips_rare_activity() {
    // One start in ten weeks.
    let history: ActivityHistory = vec![
        ActivitySample::new(StatusLabel::Start, at(6, 10, 0)),
    ]
    .into_iter()
    .collect();
    let now = NaiveDate::from_ymd_opt(2024, 7, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let rec = planner().plan(&activity(2, history), &monday_people(), now).unwrap();
    assert!(rec.is_none());
}

#[test]
fn test_plan_skips_other_weekday() {
    let mut people = monday_people();
    people.weekday = Weekday::Tue;
    let rec = planner()
        .plan(&activity(3, monday_history()), &people, at(27, 20, 0))
        .unwrap();
    assert!(rec.is_none());
}

#[test]
fn test_plan_skips_without_members() {
    let mut ctx = activity(4, monday_history());
    ctx.members.clear();
    let rec = planner().plan(&ctx, &monday_people(), at(27, 20, 0)).unwrap();
    assert!(rec.is_none());
}

#[test]
fn test_plan_skips_unmet_quorum() {
    let mut ctx = activity(5, monday_history());
    ctx.min_quorum = 3;
    let rec = planner().plan(&ctx, &monday_people(), at(27, 20, 0)).unwrap();
    assert!(rec.is_none());
}

#[test]
fn test_seeded_planning_is_reproducible() {
    let ctx = activity(6, monday_history());
    let people = monday_people();
    let a = planner().plan(&ctx, &people, at(27, 20, 0)).unwrap();
    let b = planner().plan(&ctx, &people, at(27, 20, 0)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_plan_all_isolates_failures() {
    let notification = NotificationConfig {
        cutoff_time: Some("late".to_string()),
        ..Default::default()
    };
    let planner = NotificationPlanner::new(notification, MixtureConfig::seeded(1));
    let activities = vec![
        activity(10, monday_history()),
        activity(11, ActivityHistory::default()),
    ];

    let batch = planner.plan_all(&activities, &monday_people(), at(27, 20, 0));
    assert!(!batch.is_clean());
    assert!(batch.recommendations.is_empty());
    assert_eq!(batch.errors.len(), 1);
    assert_eq!(batch.errors[0].0, 10);
    assert!(matches!(
        batch.errors[0].1,
        EstimationError::Time(TimeError::InvalidFormat { .. })
    ));
}

#[test]
fn test_plan_all_keeps_input_order() {
    let activities: Vec<ActivityContext> =
        (20..26).map(|id| activity(id, monday_history())).collect();
    let batch = planner().plan_all(&activities, &monday_people(), at(27, 20, 0));
    assert!(batch.is_clean());
    let ids: Vec<u64> = batch.recommendations.iter().map(|r| r.activity_id).collect();
    assert_eq!(ids, vec![20, 21, 22, 23, 24, 25]);
}
