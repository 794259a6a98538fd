//! Application-state owner.
//!
//! The curator holds the content store, the snapshot backend and the two
//! adapters. It runs the async flows that end in store mutations and writes
//! a snapshot after every mutation batch.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::timeout;
use tracing::{info, instrument, warn};

use crate::adapters::{
    ChannelValidator, GeneratedSummary, MockSummarizer, MockValidator, ResolvedChannel,
    SummaryGenerator, ValidationError,
};
use crate::config::ResolvedConfig;
use crate::domain::NewChannel;

use super::snapshot::SnapshotStore;
use super::store::ContentStore;

/// Owns the store and everything that feeds it
pub struct Curator {
    store: ContentStore,
    snapshots: SnapshotStore,
    validator: Box<dyn ChannelValidator>,
    summarizer: Box<dyn SummaryGenerator>,
    /// Upper bound on each adapter call
    adapter_timeout: Duration,
}

/// Result of a completed summary generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    pub video_id: String,
    pub tokens_consumed: u64,
    /// Tokens used this period after the increment
    pub tokens_used: u64,
    pub over_budget: bool,
}

impl Curator {
    /// Load the store from the configured snapshot and wire up the mock adapters
    pub async fn open(config: &ResolvedConfig) -> Result<Self> {
        let snapshots = SnapshotStore::at_path(config.snapshot_path());
        let store = snapshots.load_or_seed().await;

        let validator = MockValidator::with_delay(config.stubs.validation_delay);
        let summarizer = MockSummarizer::with_delay(config.stubs.summary_delay)
            .with_tokens_per_summary(config.stubs.tokens_per_summary);

        Ok(Self::new(
            store,
            snapshots,
            Box::new(validator),
            Box::new(summarizer),
        )
        .with_timeout(config.stubs.timeout))
    }

    pub fn new(
        store: ContentStore,
        snapshots: SnapshotStore,
        validator: Box<dyn ChannelValidator>,
        summarizer: Box<dyn SummaryGenerator>,
    ) -> Self {
        Self {
            store,
            snapshots,
            validator,
            summarizer,
            adapter_timeout: crate::config::StubSettings::default().timeout,
        }
    }

    pub fn with_timeout(mut self, adapter_timeout: Duration) -> Self {
        self.adapter_timeout = adapter_timeout;
        self
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn snapshots(&self) -> &SnapshotStore {
        &self.snapshots
    }

    /// Apply a batch of mutations, then persist the result.
    ///
    /// The in-memory change stands even if the save fails, so the caller can
    /// retry with `save`.
    pub async fn mutate<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut ContentStore) -> T,
    {
        let out = f(&mut self.store);
        self.save().await?;
        Ok(out)
    }

    /// Apply UI-only changes; nothing is written since UI state is never persisted
    pub fn update_ui<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ContentStore) -> T,
    {
        f(&mut self.store)
    }

    /// Write the current snapshot
    pub async fn save(&self) -> Result<()> {
        self.snapshots
            .save(&self.store)
            .await
            .with_context(|| format!("Failed to save snapshot: {}", self.snapshots.path().display()))
    }

    /// Replace everything with the seed dataset and persist it
    pub async fn reset_to_seed(&mut self) -> Result<()> {
        self.store = super::seed::default_store();
        self.save().await
    }

    /// Ask the validator about a channel reference. Never touches the store.
    #[instrument(skip(self), fields(validator = self.validator.name()))]
    pub async fn validate_channel(&self, reference: &str) -> Result<ResolvedChannel, ValidationError> {
        match timeout(self.adapter_timeout, self.validator.validate(reference)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Channel validation timed out");
                Err(ValidationError::TimedOut {
                    seconds: self.adapter_timeout.as_secs(),
                })
            }
        }
    }

    /// Validate a reference and, if accepted, file the channel under
    /// `category_id`. The outer `Result` carries persistence errors, the
    /// inner one the user-facing validation failure.
    #[instrument(skip(self))]
    pub async fn add_channel_from_reference(
        &mut self,
        reference: &str,
        category_id: &str,
    ) -> Result<Result<String, ValidationError>> {
        let resolved = match self.validate_channel(reference).await {
            Ok(resolved) => resolved,
            Err(e) => {
                info!(error = %e, "Channel reference rejected");
                return Ok(Err(e));
            }
        };

        let channel = NewChannel::new(resolved.name, resolved.avatar, category_id, reference.trim());
        let id = self.mutate(|store| store.add_channel(channel)).await?;

        info!(channel_id = %id, "Channel added");
        Ok(Ok(id))
    }

    /// Generate a summary for a video, store it and charge the tokens.
    ///
    /// Returns `Ok(None)` when the video does not exist. The video is cloned
    /// before the adapter runs; if it was removed by the time the summary
    /// arrives, both follow-up mutations are no-ops.
    #[instrument(skip(self), fields(summarizer = self.summarizer.name()))]
    pub async fn summarize_video(&mut self, video_id: &str) -> Result<Option<SummaryOutcome>> {
        let Some(video) = self.store.video(video_id).cloned() else {
            warn!("Video not found, nothing to summarize");
            return Ok(None);
        };
        let prompt = self.store.settings().summary_prompt.clone();

        let GeneratedSummary {
            markdown,
            tokens_consumed,
        } = timeout(self.adapter_timeout, self.summarizer.generate(&video, &prompt))
            .await
            .with_context(|| {
                format!(
                    "Summary generation for '{}' timed out after {:?}",
                    video_id, self.adapter_timeout
                )
            })?
            .with_context(|| format!("Summary generation failed for '{}'", video_id))?;

        let settings = self
            .mutate(|store| {
                store.set_video_summary(video_id, markdown);
                store.add_tokens_used(tokens_consumed);
                store.settings().clone()
            })
            .await?;

        if settings.is_over_budget() {
            warn!(
                tokens_used = settings.tokens_used,
                limit = settings.monthly_token_limit,
                "Monthly token budget exceeded"
            );
        }
        info!(tokens_consumed, "Summary stored");

        Ok(Some(SummaryOutcome {
            video_id: video_id.to_string(),
            tokens_consumed,
            tokens_used: settings.tokens_used,
            over_budget: settings.is_over_budget(),
        }))
    }

    /// Run the summarizer's API-key check against the stored key
    pub async fn test_api_key(&self) -> Result<()> {
        let api_key = &self.store.settings().api_key;
        if api_key.is_empty() {
            anyhow::bail!("No API key configured");
        }

        timeout(self.adapter_timeout, self.summarizer.health_check(api_key))
            .await
            .context("API key check timed out")?
    }
}
