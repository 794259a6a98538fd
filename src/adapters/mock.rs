//! Time-delayed mock adapters.
//!
//! Stand-ins for a real platform lookup and a real LLM. They sleep for a
//! configurable delay to behave like network calls, then answer locally.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::Video;

use super::{ChannelValidator, GeneratedSummary, ResolvedChannel, SummaryGenerator, ValidationError};

/// Default delay before the validator answers
pub const DEFAULT_VALIDATION_DELAY: Duration = Duration::from_millis(1000);

/// Default delay before the summarizer answers
pub const DEFAULT_SUMMARY_DELAY: Duration = Duration::from_millis(2500);

/// Tokens the mock summarizer reports per generation
pub const DEFAULT_TOKENS_PER_SUMMARY: u64 = 450;

/// Name given to channels referenced by URL without a handle
pub const FALLBACK_CHANNEL_NAME: &str = "YouTube Channel";

const PLATFORM_DOMAINS: [&str; 2] = ["youtube.com", "youtu.be"];

/// API keys at or below this length fail the health check
const MIN_API_KEY_LEN: usize = 10;

/// Accepts YouTube URLs and `@handle`s
#[derive(Debug, Clone)]
pub struct MockValidator {
    delay: Duration,
}

impl Default for MockValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockValidator {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_VALIDATION_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// The acceptance rule, without the delay
    pub fn resolve(reference: &str) -> Result<ResolvedChannel, ValidationError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ValidationError::Empty);
        }

        let lower = reference.to_lowercase();
        let is_platform_url = PLATFORM_DOMAINS.iter().any(|d| lower.contains(d));
        if !is_platform_url && !reference.starts_with('@') {
            return Err(ValidationError::NotRecognized {
                reference: reference.to_string(),
            });
        }

        let name = extract_handle(reference).unwrap_or_else(|| FALLBACK_CHANNEL_NAME.to_string());
        let avatar_seed = &Uuid::new_v4().simple().to_string()[..8];

        Ok(ResolvedChannel {
            name,
            avatar: format!("https://i.pravatar.cc/100?u={}", avatar_seed),
        })
    }
}

/// The handle after `@`, up to the next `/` or `?`
fn extract_handle(reference: &str) -> Option<String> {
    let (_, after) = reference.split_once('@')?;
    let handle = after.split(['/', '?']).next().unwrap_or_default().trim();

    if handle.is_empty() {
        None
    } else {
        Some(handle.to_string())
    }
}

#[async_trait]
impl ChannelValidator for MockValidator {
    fn name(&self) -> &str {
        "mock-validator"
    }

    async fn validate(&self, reference: &str) -> Result<ResolvedChannel, ValidationError> {
        sleep(self.delay).await;
        Self::resolve(reference)
    }
}

/// Produces a canned markdown summary headed by the video title
#[derive(Debug, Clone)]
pub struct MockSummarizer {
    delay: Duration,
    tokens_per_summary: u64,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SUMMARY_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            tokens_per_summary: DEFAULT_TOKENS_PER_SUMMARY,
        }
    }

    pub fn with_tokens_per_summary(mut self, tokens: u64) -> Self {
        self.tokens_per_summary = tokens;
        self
    }

    fn render(&self, video: &Video) -> String {
        format!(
            "# {title}

## 🎯 Key Points

1. **Core concept**: This video digs into the fundamentals of the topic.

2. **Hands-on implementation**: Real examples show how to apply the ideas in production projects.

3. **Best practices**: {channel} shares tips learned over years of work.

## 📌 Highlights

> \"Success comes from the quality of your focus, not the amount of work.\"

### Tools mentioned
- Tool A - for management
- Tool B - for automation
- Tool C - for analysis

## ⚡ Takeaways

- Nail the essentials before adding complexity
- Measure results constantly
- Iterate on data, not assumptions

---

*Summary generated automatically. Tokens used: ~{tokens}*",
            title = video.title,
            channel = video.channel_name,
            tokens = self.tokens_per_summary,
        )
    }
}

#[async_trait]
impl SummaryGenerator for MockSummarizer {
    fn name(&self) -> &str {
        "mock-summarizer"
    }

    async fn generate(&self, video: &Video, _prompt: &str) -> Result<GeneratedSummary> {
        sleep(self.delay).await;

        Ok(GeneratedSummary {
            markdown: self.render(video),
            tokens_consumed: self.tokens_per_summary,
        })
    }

    async fn health_check(&self, api_key: &str) -> Result<()> {
        sleep(self.delay.min(Duration::from_millis(1500))).await;

        if api_key.trim().len() <= MIN_API_KEY_LEN {
            anyhow::bail!("API key rejected: expected more than {} characters", MIN_API_KEY_LEN);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_youtube_urls() {
        let resolved = MockValidator::resolve("https://youtube.com/@Fireship").unwrap();
        assert_eq!(resolved.name, "Fireship");
        assert!(resolved.avatar.starts_with("https://i.pravatar.cc/100?u="));

        let resolved = MockValidator::resolve("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(resolved.name, FALLBACK_CHANNEL_NAME);

        let resolved = MockValidator::resolve("https://www.YouTube.com/channel/UC123").unwrap();
        assert_eq!(resolved.name, FALLBACK_CHANNEL_NAME);
    }

    #[test]
    fn test_accepts_handles() {
        let resolved = MockValidator::resolve("  @ThePrimeagen ").unwrap();
        assert_eq!(resolved.name, "ThePrimeagen");

        let resolved = MockValidator::resolve("https://youtube.com/@fireship/videos?view=0").unwrap();
        assert_eq!(resolved.name, "fireship");
    }

    #[test]
    fn test_rejects_other_references() {
        assert_eq!(MockValidator::resolve("   "), Err(ValidationError::Empty));
        assert!(matches!(
            MockValidator::resolve("https://vimeo.com/user"),
            Err(ValidationError::NotRecognized { .. })
        ));
        assert!(matches!(
            MockValidator::resolve("fireship"),
            Err(ValidationError::NotRecognized { .. })
        ));
    }

    #[test]
    fn test_bare_at_sign_falls_back_to_generic_name() {
        let resolved = MockValidator::resolve("@").unwrap();
        assert_eq!(resolved.name, FALLBACK_CHANNEL_NAME);
    }

    #[tokio::test]
    async fn test_validate_applies_rule_after_delay() {
        let validator = MockValidator::with_delay(Duration::ZERO);
        assert_eq!(validator.name(), "mock-validator");
        assert!(validator.validate("@nana").await.is_ok());
        assert!(validator.validate("nana").await.is_err());
    }

    #[test]
    fn test_summary_is_headed_by_title() {
        let video = crate::core::seed::default_videos().remove(0);
        let summarizer = MockSummarizer::with_delay(Duration::ZERO).with_tokens_per_summary(120);

        let summary = tokio_test::block_on(summarizer.generate(&video, "prompt")).unwrap();

        assert!(summary.markdown.starts_with(&format!("# {}\n", video.title)));
        assert!(summary.markdown.contains(&video.channel_name));
        assert_eq!(summary.tokens_consumed, 120);
    }

    #[tokio::test]
    async fn test_health_check_requires_long_key() {
        let summarizer = MockSummarizer::with_delay(Duration::ZERO);
        assert!(summarizer.health_check("short").await.is_err());
        assert!(summarizer.health_check("0123456789").await.is_err());
        assert!(summarizer.health_check("sk-ant-api03-xyz").await.is_ok());
    }
}
