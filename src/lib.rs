//! contenthub - Single-user content curation store
//!
//! Organize YouTube channels into categories, triage their videos and keep
//! AI-generated summaries next to them.
//!
//! # Architecture
//!
//! The system is built around one normalized in-memory store:
//! - Categories own channels, channels own videos (by id reference)
//! - All changes go through store mutations; deletes cascade
//! - Lists shown to the user are derived queries over the store
//! - The persistable part is written as a JSON snapshot after each change
//!
//! # Modules
//!
//! - `adapters`: Channel validation and summary generation (mock backends)
//! - `core`: Store, filters, snapshot persistence, seed data, Curator
//! - `domain`: Data structures (Category, Channel, Video, AppSettings, UiState)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Overview
//! contenthub dashboard
//!
//! # Long videos nobody has looked at yet
//! contenthub videos --category devops --status new --duration long
//!
//! # Follow a channel and summarize a video
//! contenthub channel add https://youtube.com/@fireship --category devops
//! contenthub summarize v1
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use core::{ContentStore, Curator, Snapshot, SnapshotStore, VideoFilters};
pub use domain::{AppSettings, Category, Channel, UiState, Video, VideoStatus};
