//! Video list filters.
//!
//! Three independent predicates (status, duration bucket, recency bucket)
//! that are ANDed together. `All` passes everything.

use chrono::{DateTime, Utc};

use crate::domain::{Video, VideoStatus};

/// Upper bound (exclusive) of the short bucket, in seconds
pub const SHORT_MAX_SECONDS: u32 = 600;

/// Upper bound (exclusive) of the medium bucket, in seconds
pub const MEDIUM_MAX_SECONDS: u32 = 1800;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Status selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VideoStatus),
}

impl StatusFilter {
    pub fn matches(&self, video: &Video) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => video.status == *status,
        }
    }
}

impl From<VideoStatus> for StatusFilter {
    fn from(status: VideoStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Duration bucket selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DurationFilter {
    #[default]
    All,
    /// Under 10 minutes
    Short,
    /// 10 to 30 minutes
    Medium,
    /// 30 minutes or more
    Long,
}

impl DurationFilter {
    pub fn matches(&self, video: &Video) -> bool {
        let secs = video.duration_seconds;
        match self {
            DurationFilter::All => true,
            DurationFilter::Short => secs < SHORT_MAX_SECONDS,
            DurationFilter::Medium => (SHORT_MAX_SECONDS..MEDIUM_MAX_SECONDS).contains(&secs),
            DurationFilter::Long => secs >= MEDIUM_MAX_SECONDS,
        }
    }
}

/// Recency bucket selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DateFilter {
    #[default]
    All,
    /// Published less than 1 day ago
    Today,
    /// Published less than 7 days ago
    Week,
    /// Published less than 30 days ago
    Month,
}

impl DateFilter {
    pub fn matches(&self, video: &Video, now: DateTime<Utc>) -> bool {
        let max_days = match self {
            DateFilter::All => return true,
            DateFilter::Today => 1.0,
            DateFilter::Week => 7.0,
            DateFilter::Month => 30.0,
        };
        elapsed_days(video.published_at, now) < max_days
    }
}

/// Fractional days between `published_at` and `now` (negative if in the future)
pub fn elapsed_days(published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - published_at).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// The three filter selections applied to every video list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VideoFilters {
    pub status: StatusFilter,
    pub duration: DurationFilter,
    pub date: DateFilter,
}

impl VideoFilters {
    pub fn new(status: StatusFilter, duration: DurationFilter, date: DateFilter) -> Self {
        Self {
            status,
            duration,
            date,
        }
    }

    /// True when no filter narrows the list
    pub fn is_pass_through(&self) -> bool {
        *self == Self::default()
    }

    /// Check a single video against all three predicates
    pub fn matches(&self, video: &Video, now: DateTime<Utc>) -> bool {
        self.status.matches(video) && self.duration.matches(video) && self.date.matches(video, now)
    }

    /// Keep the videos that pass every predicate, preserving order
    pub fn apply<'a, I>(&self, videos: I, now: DateTime<Utc>) -> Vec<&'a Video>
    where
        I: IntoIterator<Item = &'a Video>,
    {
        videos
            .into_iter()
            .filter(|video| self.matches(video, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn video(duration_seconds: u32, published_at: DateTime<Utc>) -> Video {
        Video {
            id: "v".to_string(),
            title: "t".to_string(),
            channel_id: "c".to_string(),
            channel_name: "C".to_string(),
            thumbnail: String::new(),
            duration: String::new(),
            duration_seconds,
            published_at,
            status: VideoStatus::New,
            has_transcript: false,
            summary: None,
            summary_generated_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_duration_bucket_edges() {
        let at = now();
        assert!(DurationFilter::Short.matches(&video(599, at)));
        assert!(!DurationFilter::Short.matches(&video(600, at)));
        assert!(DurationFilter::Medium.matches(&video(600, at)));
        assert!(DurationFilter::Medium.matches(&video(1799, at)));
        assert!(!DurationFilter::Medium.matches(&video(1800, at)));
        assert!(DurationFilter::Long.matches(&video(1800, at)));
        assert!(!DurationFilter::Long.matches(&video(1799, at)));
    }

    #[test]
    fn test_date_bucket_edges() {
        let day = |d: f64| now() - Duration::milliseconds((d * MILLIS_PER_DAY) as i64);

        assert!(DateFilter::Today.matches(&video(0, day(0.99)), now()));
        assert!(!DateFilter::Today.matches(&video(0, day(1.0)), now()));
        assert!(DateFilter::Week.matches(&video(0, day(6.99)), now()));
        assert!(!DateFilter::Week.matches(&video(0, day(7.0)), now()));
        assert!(DateFilter::Month.matches(&video(0, day(29.99)), now()));
        assert!(!DateFilter::Month.matches(&video(0, day(30.0)), now()));
    }

    #[test]
    fn test_future_publication_counts_as_recent() {
        let future = now() + Duration::hours(3);
        assert!(elapsed_days(future, now()) < 0.0);
        assert!(DateFilter::Today.matches(&video(0, future), now()));
    }

    #[test]
    fn test_all_passes_everything() {
        let filters = VideoFilters::default();
        assert!(filters.is_pass_through());

        let old = video(100_000, Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap());
        assert!(filters.matches(&old, now()));
    }

    #[test]
    fn test_status_filter() {
        let mut v = video(10, now());
        v.status = VideoStatus::Pending;

        assert!(StatusFilter::All.matches(&v));
        assert!(StatusFilter::from(VideoStatus::Pending).matches(&v));
        assert!(!StatusFilter::from(VideoStatus::New).matches(&v));
    }
}
