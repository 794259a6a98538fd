//! Channels are the content sources filed under a category.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A content source. Belongs to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Unique identifier, referenced by `Video::channel_id`
    pub id: String,

    /// Display name
    pub name: String,

    /// Avatar image URI
    pub avatar: String,

    /// Owning category
    pub category_id: String,

    /// Channel URL on the platform
    pub url: String,

    /// Advisory count shown next to the channel. Not kept in sync with the
    /// video collection.
    pub video_count: u32,
}

/// Fields supplied when adding a channel; the store assigns the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChannel {
    pub name: String,
    pub avatar: String,
    pub category_id: String,
    pub url: String,
}

impl NewChannel {
    pub fn new(
        name: impl Into<String>,
        avatar: impl Into<String>,
        category_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            avatar: avatar.into(),
            category_id: category_id.into(),
            url: url.into(),
        }
    }
}

impl From<NewChannel> for Channel {
    fn from(new: NewChannel) -> Self {
        Self {
            id: format!("ch-{}", Uuid::new_v4().simple()),
            name: new.name,
            avatar: new.avatar,
            category_id: new.category_id,
            url: new.url,
            video_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_gets_prefixed_id_and_zero_count() {
        let channel: Channel = NewChannel::new(
            "Fireship",
            "https://i.pravatar.cc/100?u=fire",
            "devops",
            "https://youtube.com/@Fireship",
        )
        .into();

        assert!(channel.id.starts_with("ch-"));
        assert_eq!(channel.id.len(), "ch-".len() + 32);
        assert_eq!(channel.video_count, 0);
        assert_eq!(channel.category_id, "devops");
    }

    #[test]
    fn test_channel_serializes_camel_case() {
        let channel = Channel {
            id: "nana".to_string(),
            name: "TechWorld with Nana".to_string(),
            avatar: "a".to_string(),
            category_id: "devops".to_string(),
            url: "u".to_string(),
            video_count: 5,
        };

        let json = serde_json::to_value(&channel).unwrap();
        assert_eq!(json["categoryId"], "devops");
        assert_eq!(json["videoCount"], 5);
    }
}
