//! Transient selection state. Never persisted; resets on every load.

use crate::core::filter::VideoFilters;

/// Which main view is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActiveView {
    #[default]
    Dashboard,
    Category,
    Channel,
    Settings,
}

impl std::fmt::Display for ActiveView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActiveView::Dashboard => write!(f, "dashboard"),
            ActiveView::Category => write!(f, "category"),
            ActiveView::Channel => write!(f, "channel"),
            ActiveView::Settings => write!(f, "settings"),
        }
    }
}

/// Selection, panel and filter state of the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub active_view: ActiveView,
    pub active_category_id: Option<String>,
    pub active_channel_id: Option<String>,

    /// Drives the summary panel: open iff a video is selected
    pub selected_video_id: Option<String>,

    pub is_add_channel_modal_open: bool,
    pub is_summary_panel_open: bool,

    pub filters: VideoFilters,
}
