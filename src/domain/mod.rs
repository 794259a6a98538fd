//! Domain types for contenthub.
//!
//! This module contains the core data structures:
//! - Category: Folder-like grouping of channels
//! - Channel: A content source filed under one category
//! - Video: A content item with triage status and optional summary
//! - AppSettings: Credential, prompt and token budget
//! - UiState: Transient selection and filter state

pub mod category;
pub mod channel;
pub mod settings;
pub mod ui;
pub mod video;

// Re-export commonly used types
pub use category::{Category, CategoryIcon, CategoryUpdate, DEFAULT_CATEGORY_COLOR};
pub use channel::{Channel, NewChannel};
pub use settings::{AppSettings, SettingsUpdate};
pub use ui::{ActiveView, UiState};
pub use video::{Video, VideoStatus};
