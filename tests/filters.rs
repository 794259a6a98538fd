//! Filter Integration Tests
//!
//! Bucket boundaries and conjunction of the three predicates.

use chrono::{DateTime, Duration, TimeZone, Utc};
use contenthub::core::filter::elapsed_days;
use contenthub::core::{DateFilter, DurationFilter, StatusFilter, VideoFilters};
use contenthub::domain::{Video, VideoStatus};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 14, 0, 0, 0).unwrap()
}

fn video(id: &str, seconds: u32, age: Duration, status: VideoStatus) -> Video {
    Video {
        id: id.to_string(),
        title: id.to_string(),
        channel_id: "ch".to_string(),
        channel_name: "Channel".to_string(),
        thumbnail: String::new(),
        duration: String::new(),
        duration_seconds: seconds,
        published_at: now() - age,
        status,
        has_transcript: false,
        summary: None,
        summary_generated_at: None,
    }
}

/// Fractional days as a millisecond duration
fn days(d: f64) -> Duration {
    Duration::milliseconds((d * 86_400_000.0).round() as i64)
}

fn ids<'a>(videos: &[&'a Video]) -> Vec<&'a str> {
    videos.iter().map(|v| v.id.as_str()).collect()
}

#[test]
fn test_duration_bucket_boundaries() {
    let cases = [
        (599, DurationFilter::Short),
        (600, DurationFilter::Medium),
        (1799, DurationFilter::Medium),
        (1800, DurationFilter::Long),
    ];

    for (seconds, expected) in cases {
        let v = video("v", seconds, Duration::zero(), VideoStatus::New);
        for bucket in [DurationFilter::Short, DurationFilter::Medium, DurationFilter::Long] {
            assert_eq!(
                bucket.matches(&v),
                bucket == expected,
                "{} seconds in {:?}",
                seconds,
                bucket
            );
        }
        assert!(DurationFilter::All.matches(&v));
    }
}

#[test]
fn test_date_bucket_boundaries() {
    let cases = [
        (0.99, true, true),
        (1.0, false, true),
        (6.99, false, true),
        (7.0, false, false),
    ];

    for (age, today, week) in cases {
        let v = video("v", 60, days(age), VideoStatus::New);
        assert_eq!(DateFilter::Today.matches(&v, now()), today, "{} days today", age);
        assert_eq!(DateFilter::Week.matches(&v, now()), week, "{} days week", age);
        assert!(DateFilter::Month.matches(&v, now()));
    }

    let old = video("old", 60, days(30.0), VideoStatus::New);
    assert!(!DateFilter::Month.matches(&old, now()));
    assert!(DateFilter::All.matches(&old, now()));
}

#[test]
fn test_elapsed_days_is_fractional() {
    let published = now() - Duration::hours(36);
    assert!((elapsed_days(published, now()) - 1.5).abs() < f64::EPSILON);
}

#[test]
fn test_filters_are_conjunctive() {
    let videos = vec![
        video("short-new-today", 599, days(0.99), VideoStatus::New),
        video("medium-new-today", 600, days(0.5), VideoStatus::New),
        video("medium-pending-week", 1799, days(6.99), VideoStatus::Pending),
        video("long-new-week", 1800, days(1.0), VideoStatus::New),
        video("long-new-old", 3600, days(7.0), VideoStatus::New),
        video("long-watched-today", 5400, days(0.1), VideoStatus::Watched),
    ];

    let all = VideoFilters::default();
    assert!(all.is_pass_through());
    assert_eq!(all.apply(&videos, now()).len(), videos.len());

    let long_new = VideoFilters::new(
        StatusFilter::Only(VideoStatus::New),
        DurationFilter::Long,
        DateFilter::All,
    );
    assert_eq!(
        ids(&long_new.apply(&videos, now())),
        vec!["long-new-week", "long-new-old"]
    );

    let long_new_week = VideoFilters {
        date: DateFilter::Week,
        ..long_new
    };
    assert_eq!(ids(&long_new_week.apply(&videos, now())), vec!["long-new-week"]);

    let new_today = VideoFilters::new(VideoStatus::New.into(), DurationFilter::All, DateFilter::Today);
    assert_eq!(
        ids(&new_today.apply(&videos, now())),
        vec!["short-new-today", "medium-new-today"]
    );

    // Every result satisfies every predicate
    for filters in [long_new, long_new_week, new_today] {
        for v in filters.apply(&videos, now()) {
            assert!(filters.status.matches(v));
            assert!(filters.duration.matches(v));
            assert!(filters.date.matches(v, now()));
        }
    }
}

#[test]
fn test_new_short_week_boundary_fixture() {
    let videos = vec![
        video("599s-0.99d", 599, days(0.99), VideoStatus::New),
        video("600s-0.99d", 600, days(0.99), VideoStatus::New),
        video("599s-6.99d", 599, days(6.99), VideoStatus::New),
        video("599s-7.0d", 599, days(7.0), VideoStatus::New),
        video("1799s-1.0d", 1799, days(1.0), VideoStatus::New),
        video("1800s-1.0d", 1800, days(1.0), VideoStatus::New),
        video("599s-1.0d-pending", 599, days(1.0), VideoStatus::Pending),
    ];

    let filters = VideoFilters::new(
        StatusFilter::Only(VideoStatus::New),
        DurationFilter::Short,
        DateFilter::Week,
    );
    assert_eq!(
        ids(&filters.apply(&videos, now())),
        vec!["599s-0.99d", "599s-6.99d"]
    );
}

#[test]
fn test_apply_preserves_order() {
    let videos = vec![
        video("c", 100, days(2.0), VideoStatus::Pending),
        video("a", 100, days(1.0), VideoStatus::Pending),
        video("b", 100, days(3.0), VideoStatus::Pending),
    ];
    let pending = VideoFilters::new(
        StatusFilter::Only(VideoStatus::Pending),
        DurationFilter::Short,
        DateFilter::Month,
    );
    assert_eq!(ids(&pending.apply(&videos, now())), vec!["c", "a", "b"]);
}
