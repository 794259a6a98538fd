//! Videos and their triage status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item published by a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Unique identifier
    pub id: String,

    /// Video title
    pub title: String,

    /// Owning channel
    pub channel_id: String,

    /// Channel name copied at creation time (not updated on rename)
    pub channel_name: String,

    /// Thumbnail image URI
    pub thumbnail: String,

    /// Human-readable length, e.g. "1:45:30"
    pub duration: String,

    /// Length in seconds; the value filters use
    pub duration_seconds: u32,

    /// Publication time
    pub published_at: DateTime<Utc>,

    /// Triage status
    pub status: VideoStatus,

    /// Whether a transcript exists to summarize from
    pub has_transcript: bool,

    /// Generated markdown summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// When `summary` was generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_generated_at: Option<DateTime<Utc>>,
}

impl Video {
    pub fn is_new(&self) -> bool {
        self.status == VideoStatus::New
    }

    pub fn has_summary(&self) -> bool {
        self.summary.is_some()
    }
}

/// Triage state of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VideoStatus {
    New,
    Watched,
    Pending,
    NotInterested,
}

impl VideoStatus {
    pub const ALL: [VideoStatus; 4] = [
        VideoStatus::New,
        VideoStatus::Watched,
        VideoStatus::Pending,
        VideoStatus::NotInterested,
    ];
}

impl std::fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VideoStatus::New => write!(f, "new"),
            VideoStatus::Watched => write!(f, "watched"),
            VideoStatus::Pending => write!(f, "pending"),
            VideoStatus::NotInterested => write!(f, "not-interested"),
        }
    }
}

impl std::str::FromStr for VideoStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "new" => Ok(VideoStatus::New),
            "watched" => Ok(VideoStatus::Watched),
            "pending" => Ok(VideoStatus::Pending),
            "not-interested" | "not_interested" | "notinterested" => {
                Ok(VideoStatus::NotInterested)
            }
            _ => anyhow::bail!("Unknown video status: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&VideoStatus::NotInterested).unwrap(),
            "\"not-interested\""
        );
        let status: VideoStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, VideoStatus::Pending);
    }

    #[test]
    fn test_status_display_round_trips_through_from_str() {
        for status in VideoStatus::ALL {
            assert_eq!(status.to_string().parse::<VideoStatus>().unwrap(), status);
        }
        assert!("archived".parse::<VideoStatus>().is_err());
    }

    #[test]
    fn test_summary_fields_are_optional_on_the_wire() {
        let json = r#"{
            "id": "v1",
            "title": "Kubernetes Tutorial",
            "channelId": "nana",
            "channelName": "TechWorld with Nana",
            "thumbnail": "https://picsum.photos/seed/k8s/320/180",
            "duration": "4:02:15",
            "durationSeconds": 14535,
            "publishedAt": "2024-01-12T10:00:00Z",
            "status": "new",
            "hasTranscript": true
        }"#;

        let video: Video = serde_json::from_str(json).unwrap();
        assert!(video.is_new());
        assert!(!video.has_summary());
        assert!(video.summary_generated_at.is_none());

        let out = serde_json::to_value(&video).unwrap();
        assert!(out.get("summary").is_none());
    }
}
