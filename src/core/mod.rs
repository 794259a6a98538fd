//! Core store logic.
//!
//! This module contains:
//! - ContentStore: The normalized in-memory store and its derived queries
//! - Filter: Status, duration and recency predicates
//! - Snapshot: JSON persistence of the store
//! - Seed: The built-in dataset
//! - Curator: Owner of the store that drives adapters and persistence

pub mod curator;
pub mod filter;
pub mod seed;
pub mod snapshot;
pub mod store;

// Re-export commonly used types
pub use curator::{Curator, SummaryOutcome};
pub use filter::{DateFilter, DurationFilter, StatusFilter, VideoFilters};
pub use snapshot::{Snapshot, SnapshotError, SnapshotStore};
pub use store::{CategoryHighlight, ContentStore, DashboardStats};
