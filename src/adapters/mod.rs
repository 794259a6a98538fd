//! Adapter interfaces for external collaborators.
//!
//! Two seams sit behind traits so a real backend can replace the mocks:
//! - `ChannelValidator`: resolves a free-text channel reference
//! - `SummaryGenerator`: produces a markdown summary for a video
//!
//! Neither touches the content store; the caller applies the results.

pub mod mock;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Video;

// Re-export the mock adapters
pub use mock::{MockSummarizer, MockValidator};

/// A channel reference the validator accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChannel {
    /// Display name for the channel
    pub name: String,

    /// Avatar image URI
    pub avatar: String,
}

/// Why a channel reference was rejected. The message is shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a channel URL or @handle")]
    Empty,

    #[error("Invalid URL. Enter a YouTube URL or an @handle")]
    NotRecognized { reference: String },

    #[error("Validation timed out after {seconds}s, try again")]
    TimedOut { seconds: u64 },
}

/// Output of a summary generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSummary {
    /// Markdown summary text
    pub markdown: String,

    /// Tokens consumed by the generation
    pub tokens_consumed: u64,
}

/// Resolves a channel reference into display metadata
#[async_trait]
pub trait ChannelValidator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Validate a channel URL or handle
    async fn validate(&self, reference: &str) -> Result<ResolvedChannel, ValidationError>;
}

/// Generates video summaries
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Summarize a video using the given prompt template
    async fn generate(&self, video: &Video, prompt: &str) -> Result<GeneratedSummary>;

    /// Check that the API key would be accepted
    async fn health_check(&self, api_key: &str) -> Result<()>;
}

/// File name for exporting a video's summary: every character outside
/// `[A-Za-z0-9]` becomes `_`, then lowercased, with a `_summary.md` suffix
pub fn summary_export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{}_summary.md", stem)
}
