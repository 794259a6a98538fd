//! Built-in dataset used on first launch and whenever the snapshot is
//! missing or unreadable.

use chrono::{DateTime, Utc};

use crate::domain::{AppSettings, Category, CategoryIcon, Channel, Video, VideoStatus};

use super::store::ContentStore;

/// Prompt template shipped with the default settings
pub const DEFAULT_SUMMARY_PROMPT: &str = "You are an expert at summarizing YouTube videos. Write a concise, useful summary of the content.

Summary format:
1. Use markdown with headers, lists and emojis
2. Include the main key points (5 at most)
3. Add notable verbatim quotes if there are any
4. Finish with a \"Takeaways\" section
5. For tutorials, list the main steps
6. Keep the summary under 500 words

Goal: the reader gets 80% of the video's value in a two-minute read.";

pub const DEFAULT_MONTHLY_TOKEN_LIMIT: u64 = 100_000;

const SEED_TOKENS_USED: u64 = 12_450;

/// Seed rows: (id, title, channel id, thumbnail seed, duration, seconds, published, status, transcript)
type VideoRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    u32,
    &'static str,
    VideoStatus,
    bool,
);

const CROSSPLANE_SUMMARY: &str = "# Crossplane vs Terraform: Key Insights

## 🎯 Main Takeaways

1. **Crossplane** excels at Kubernetes-native infrastructure
2. **Terraform** remains king for multi-cloud setups
3. Both can coexist in enterprise environments

## ⚡ Quick Comparison

| Feature | Crossplane | Terraform |
|---------|------------|-----------|
| Learning curve | Steeper | Moderate |
| K8s integration | Native | Via provider |
| State management | In-cluster | External |

## 📌 Recommendation

Start with Terraform for general IaC, add Crossplane when you need GitOps-native resource management.";

const NOTION_SUMMARY: &str = "# YouTube Workflow in Notion

## 📝 System Overview

Ali walks through his team's content pipeline:

### Stages
1. **Ideation** → Capture ideas in a database
2. **Research** → Link sources and outlines
3. **Script** → Draft with AI assistance
4. **Production** → Track filming and editing
5. **Post** → Schedule and monitor

## 🔑 Key Templates

- Video database with custom properties
- Linked content calendar
- Analytics dashboard

## 💡 Pro Tip

> Use relations to connect ideas to published videos for content repurposing.";

/// A store holding the seed dataset
pub fn default_store() -> ContentStore {
    ContentStore::new(
        default_categories(),
        default_channels(),
        default_videos(),
        default_settings(),
    )
}

pub fn default_categories() -> Vec<Category> {
    [
        ("devops", "DevOps", CategoryIcon::Server, "#22c55e", true),
        ("youtube-growth", "YouTube Growth", CategoryIcon::TrendingUp, "#f43f5e", true),
        ("ux-ui", "UX/UI", CategoryIcon::Palette, "#8b5cf6", false),
        ("personal", "Personal", CategoryIcon::User, "#06b6d4", false),
    ]
    .into_iter()
    .map(|(id, name, icon, color, is_expanded)| Category {
        id: id.to_string(),
        name: name.to_string(),
        icon,
        color: color.to_string(),
        is_expanded,
    })
    .collect()
}

pub fn default_channels() -> Vec<Channel> {
    [
        ("nana", "TechWorld with Nana", "nana", "devops", "TechWorldwithNana", 5),
        ("devops-toolkit", "DevOps Toolkit", "devops", "devops", "DevOpsToolkit", 4),
        ("ali-abdaal", "Ali Abdaal", "ali", "youtube-growth", "aliabdaal", 6),
        ("think-media", "Think Media", "think", "youtube-growth", "ThinkMedia", 5),
        ("aj-smart", "AJ&Smart", "aj", "ux-ui", "AJSmart", 4),
        ("the-futur", "The Futur", "futur", "ux-ui", "thefutur", 5),
    ]
    .into_iter()
    .map(|(id, name, avatar_seed, category_id, handle, video_count)| Channel {
        id: id.to_string(),
        name: name.to_string(),
        avatar: format!("https://i.pravatar.cc/100?u={}", avatar_seed),
        category_id: category_id.to_string(),
        url: format!("https://youtube.com/@{}", handle),
        video_count,
    })
    .collect()
}

pub fn default_videos() -> Vec<Video> {
    use VideoStatus::*;

    let rows: [VideoRow; 29] = [
        ("v1", "Kubernetes Tutorial for Beginners - Full Course in 4 Hours", "nana", "k8s", "4:02:15", 14535, "2024-01-12T10:00:00Z", New, true),
        ("v2", "Docker Compose Tutorial - Complete Guide", "nana", "docker", "1:45:30", 6330, "2024-01-11T14:00:00Z", New, true),
        ("v3", "GitOps with ArgoCD - Production Setup", "nana", "argo", "58:22", 3502, "2024-01-10T09:00:00Z", Watched, true),
        ("v4", "Terraform Best Practices 2024", "nana", "tf", "45:10", 2710, "2024-01-08T11:00:00Z", Pending, false),
        ("v5", "CI/CD Pipeline with GitHub Actions", "nana", "ghactions", "1:12:45", 4365, "2024-01-05T16:00:00Z", NotInterested, true),
        ("v6", "Platform Engineering in 2024", "devops-toolkit", "platform", "32:18", 1938, "2024-01-13T08:00:00Z", New, true),
        ("v7", "Crossplane vs Terraform - Which One?", "devops-toolkit", "cross", "28:45", 1725, "2024-01-12T15:00:00Z", New, true),
        ("v8", "Backstage Developer Portal Setup", "devops-toolkit", "backstage", "41:22", 2482, "2024-01-09T12:00:00Z", Pending, true),
        ("v9", "Kyverno Policy Engine Deep Dive", "devops-toolkit", "kyverno", "35:55", 2155, "2024-01-06T10:00:00Z", Watched, false),
        ("v10", "How I Made $5M on YouTube Last Year", "ali-abdaal", "money", "22:15", 1335, "2024-01-13T06:00:00Z", New, true),
        ("v11", "The Perfect YouTube Workflow in Notion", "ali-abdaal", "notion", "18:42", 1122, "2024-01-12T09:00:00Z", New, true),
        ("v12", "Why Most YouTube Channels Fail", "ali-abdaal", "fail", "25:30", 1530, "2024-01-10T14:00:00Z", Pending, true),
        ("v13", "My Camera Setup for 2024", "ali-abdaal", "camera", "15:18", 918, "2024-01-07T11:00:00Z", NotInterested, true),
        ("v14", "How to Edit Videos 10x Faster", "ali-abdaal", "edit", "19:45", 1185, "2024-01-04T08:00:00Z", Watched, true),
        ("v15", "The Science of Viral Thumbnails", "ali-abdaal", "thumb", "21:10", 1270, "2024-01-02T12:00:00Z", Watched, false),
        ("v16", "Best Budget Camera for YouTube 2024", "think-media", "budget", "16:22", 982, "2024-01-13T11:00:00Z", New, true),
        ("v17", "YouTube Algorithm Secrets Revealed", "think-media", "algo", "24:55", 1495, "2024-01-11T08:00:00Z", New, true),
        ("v18", "Lighting Setup Under $100", "think-media", "light", "12:30", 750, "2024-01-09T15:00:00Z", Watched, true),
        ("v19", "How to Get Your First 1000 Subscribers", "think-media", "subs", "28:15", 1695, "2024-01-06T13:00:00Z", Pending, true),
        ("v20", "YouTube Shorts Strategy That Works", "think-media", "shorts", "18:40", 1120, "2024-01-03T10:00:00Z", New, false),
        ("v21", "Design Sprint in 60 Minutes", "aj-smart", "sprint", "58:30", 3510, "2024-01-12T07:00:00Z", New, true),
        ("v22", "Figma Tips No One Talks About", "aj-smart", "figma", "22:18", 1338, "2024-01-10T11:00:00Z", Pending, true),
        ("v23", "User Research on a Budget", "aj-smart", "research", "31:45", 1905, "2024-01-07T14:00:00Z", Watched, true),
        ("v24", "The Best UX Portfolio Examples", "aj-smart", "portfolio", "19:22", 1162, "2024-01-04T09:00:00Z", New, false),
        ("v25", "Pricing Design Services in 2024", "the-futur", "pricing", "45:12", 2712, "2024-01-13T09:00:00Z", New, true),
        ("v26", "Client Red Flags to Watch For", "the-futur", "client", "28:55", 1735, "2024-01-11T13:00:00Z", Pending, true),
        ("v27", "Building a Design Agency", "the-futur", "agency", "52:30", 3150, "2024-01-08T10:00:00Z", Watched, true),
        ("v28", "Logo Design Process Explained", "the-futur", "logo", "38:18", 2298, "2024-01-05T15:00:00Z", New, true),
        ("v29", "Freelance vs Full-Time Design", "the-futur", "freelance", "33:42", 2022, "2024-01-02T08:00:00Z", NotInterested, false),
    ];

    let channels = default_channels();

    rows.into_iter()
        .map(
            |(id, title, channel_id, thumb, duration, duration_seconds, published, status, has_transcript)| {
                let channel_name = channels
                    .iter()
                    .find(|ch| ch.id == channel_id)
                    .map(|ch| ch.name.clone())
                    .unwrap_or_default();

                let (summary, summary_generated_at) = match id {
                    "v7" => (Some(CROSSPLANE_SUMMARY), Some("2024-01-12T16:30:00Z")),
                    "v11" => (Some(NOTION_SUMMARY), Some("2024-01-12T10:00:00Z")),
                    _ => (None, None),
                };

                Video {
                    id: id.to_string(),
                    title: title.to_string(),
                    channel_id: channel_id.to_string(),
                    channel_name,
                    thumbnail: format!("https://picsum.photos/seed/{}/320/180", thumb),
                    duration: duration.to_string(),
                    duration_seconds,
                    published_at: parse_timestamp(published),
                    status,
                    has_transcript,
                    summary: summary.map(str::to_string),
                    summary_generated_at: summary_generated_at.map(parse_timestamp),
                }
            },
        )
        .collect()
}

pub fn default_settings() -> AppSettings {
    AppSettings {
        api_key: String::new(),
        summary_prompt: DEFAULT_SUMMARY_PROMPT.to_string(),
        monthly_token_limit: DEFAULT_MONTHLY_TOKEN_LIMIT,
        tokens_used: SEED_TOKENS_USED,
    }
}

/// A fixed "now" shortly after the newest seed video, for deterministic filtering
pub fn reference_now() -> DateTime<Utc> {
    parse_timestamp("2024-01-14T00:00:00Z")
}

fn parse_timestamp(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_timestamps_all_parse() {
        for video in default_videos() {
            assert_ne!(video.published_at, DateTime::<Utc>::default(), "{}", video.id);
        }
    }

    #[test]
    fn test_seed_foreign_keys_are_valid() {
        let categories: HashSet<String> = default_categories().into_iter().map(|c| c.id).collect();
        let channels = default_channels();
        let channel_ids: HashSet<&str> = channels.iter().map(|c| c.id.as_str()).collect();

        assert!(channels.iter().all(|ch| categories.contains(&ch.category_id)));
        assert!(default_videos()
            .iter()
            .all(|v| channel_ids.contains(v.channel_id.as_str())));
    }

    #[test]
    fn test_seed_channel_names_are_denormalized() {
        let videos = default_videos();
        let v1 = videos.iter().find(|v| v.id == "v1").unwrap();
        assert_eq!(v1.channel_name, "TechWorld with Nana");
    }

    #[test]
    fn test_seed_has_two_summaries() {
        let summarized: Vec<_> = default_videos()
            .into_iter()
            .filter(|v| v.summary.is_some())
            .map(|v| v.id)
            .collect();
        assert_eq!(summarized, vec!["v7", "v11"]);
    }
}
