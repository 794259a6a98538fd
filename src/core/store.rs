//! The in-memory content store.
//!
//! Owns every category, channel and video plus the settings singleton and
//! the transient UI state. Mutations are synchronous and take `&mut self`;
//! queries borrow and are recomputed on every call, so they always reflect
//! the latest mutation.
//!
//! Mutations addressed at an id that does not exist are silent no-ops.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{
    ActiveView, AppSettings, Category, CategoryUpdate, Channel, NewChannel, SettingsUpdate,
    UiState, Video, VideoStatus,
};

use super::filter::{DateFilter, DurationFilter, StatusFilter, VideoFilters};
use super::snapshot::Snapshot;

/// Number of new videos the dashboard lists per category
pub const DASHBOARD_HIGHLIGHTS_PER_CATEGORY: usize = 3;

/// Normalized store of categories → channels → videos
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStore {
    categories: Vec<Category>,
    channels: Vec<Channel>,
    videos: Vec<Video>,
    settings: AppSettings,
    ui: UiState,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub new_videos: usize,
    pub pending_videos: usize,
    pub summarized_videos: usize,
}

/// A category with a preview of its newest-status videos
#[derive(Debug, Clone)]
pub struct CategoryHighlight<'a> {
    pub category: &'a Category,
    pub new_count: usize,
    pub videos: Vec<&'a Video>,
}

impl ContentStore {
    /// Build a store from persisted entities; UI state starts at defaults
    pub fn new(
        categories: Vec<Category>,
        channels: Vec<Channel>,
        videos: Vec<Video>,
        settings: AppSettings,
    ) -> Self {
        Self {
            categories,
            channels,
            videos,
            settings,
            ui: UiState::default(),
        }
    }

    /// Restore a store from a snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::new(
            snapshot.categories,
            snapshot.channels,
            snapshot.videos,
            snapshot.settings,
        )
    }

    /// Capture the persisted subset of the store
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.categories.clone(),
            self.channels.clone(),
            self.videos.clone(),
            self.settings.clone(),
        )
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn videos(&self) -> &[Video] {
        &self.videos
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.id == id)
    }

    pub fn video(&self, id: &str) -> Option<&Video> {
        self.videos.iter().find(|v| v.id == id)
    }

    /// The video the summary panel is showing, if any
    pub fn selected_video(&self) -> Option<&Video> {
        self.ui
            .selected_video_id
            .as_deref()
            .and_then(|id| self.video(id))
    }

    // ------------------------------------------------------------------------
    // Category mutations
    // ------------------------------------------------------------------------

    /// Add a category and return its generated id
    pub fn add_category(&mut self, name: impl Into<String>) -> String {
        let category = Category::new(name);
        let id = category.id.clone();
        self.categories.push(category);
        id
    }

    pub fn update_category(&mut self, id: &str, update: CategoryUpdate) {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => category.apply(update),
            None => debug!(category_id = id, "update_category: no such category"),
        }
    }

    /// Remove a category together with its channels and their videos
    pub fn delete_category(&mut self, id: &str) {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            debug!(category_id = id, "delete_category: no such category");
        }

        let removed_channels: HashSet<String> = self
            .channels
            .iter()
            .filter(|ch| ch.category_id == id)
            .map(|ch| ch.id.clone())
            .collect();

        self.channels.retain(|ch| ch.category_id != id);
        self.videos
            .retain(|v| !removed_channels.contains(&v.channel_id));

        self.clear_dangling_selection();
    }

    pub fn toggle_category_expanded(&mut self, id: &str) {
        match self.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => category.is_expanded = !category.is_expanded,
            None => debug!(category_id = id, "toggle_category_expanded: no such category"),
        }
    }

    // ------------------------------------------------------------------------
    // Channel mutations
    // ------------------------------------------------------------------------

    /// Add a channel and return its generated id. `video_count` starts at 0.
    pub fn add_channel(&mut self, channel: NewChannel) -> String {
        let channel = Channel::from(channel);
        let id = channel.id.clone();
        self.channels.push(channel);
        id
    }

    /// Repoint a channel at another category. The target is not checked.
    pub fn move_channel(&mut self, channel_id: &str, new_category_id: &str) {
        match self.channels.iter_mut().find(|ch| ch.id == channel_id) {
            Some(channel) => channel.category_id = new_category_id.to_string(),
            None => debug!(channel_id, "move_channel: no such channel"),
        }
    }

    /// Remove a channel and its videos
    pub fn remove_channel(&mut self, id: &str) {
        let before = self.channels.len();
        self.channels.retain(|ch| ch.id != id);
        if self.channels.len() == before {
            debug!(channel_id = id, "remove_channel: no such channel");
        }

        self.videos.retain(|v| v.channel_id != id);
        self.clear_dangling_selection();
    }

    // ------------------------------------------------------------------------
    // Video mutations
    // ------------------------------------------------------------------------

    pub fn update_video_status(&mut self, video_id: &str, status: VideoStatus) {
        match self.videos.iter_mut().find(|v| v.id == video_id) {
            Some(video) => video.status = status,
            None => debug!(video_id, "update_video_status: no such video"),
        }
    }

    /// Store a generated summary, replacing any previous one
    pub fn set_video_summary(&mut self, video_id: &str, summary: impl Into<String>) {
        match self.videos.iter_mut().find(|v| v.id == video_id) {
            Some(video) => {
                video.summary = Some(summary.into());
                video.summary_generated_at = Some(Utc::now());
            }
            None => debug!(video_id, "set_video_summary: no such video"),
        }
    }

    // ------------------------------------------------------------------------
    // Settings mutations
    // ------------------------------------------------------------------------

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
    }

    /// Add to the running token counter
    pub fn add_tokens_used(&mut self, tokens: u64) {
        let total = self.settings.tokens_used.saturating_add(tokens);
        self.update_settings(SettingsUpdate::default().tokens_used(total));
    }

    // ------------------------------------------------------------------------
    // UI state
    // ------------------------------------------------------------------------

    /// Switch views. The dashboard drops the active category.
    pub fn set_active_view(&mut self, view: ActiveView) {
        self.ui.active_view = view;
        if view == ActiveView::Dashboard {
            self.ui.active_category_id = None;
            self.ui.active_channel_id = None;
        }
    }

    /// Select a category (view becomes Category) or clear it (view becomes Dashboard)
    pub fn set_active_category(&mut self, id: Option<&str>) {
        self.ui.active_channel_id = None;
        match id {
            Some(id) => {
                self.ui.active_category_id = Some(id.to_string());
                self.ui.active_view = ActiveView::Category;
            }
            None => {
                self.ui.active_category_id = None;
                self.ui.active_view = ActiveView::Dashboard;
            }
        }
    }

    /// Select a channel (view becomes Channel, its category becomes active)
    /// or clear it (view falls back to the active category or the dashboard)
    pub fn set_active_channel(&mut self, id: Option<&str>) {
        match id {
            Some(id) => {
                if let Some(category_id) = self.channel(id).map(|ch| ch.category_id.clone()) {
                    self.ui.active_category_id = Some(category_id);
                }
                self.ui.active_channel_id = Some(id.to_string());
                self.ui.active_view = ActiveView::Channel;
            }
            None => {
                self.ui.active_channel_id = None;
                self.ui.active_view = if self.ui.active_category_id.is_some() {
                    ActiveView::Category
                } else {
                    ActiveView::Dashboard
                };
            }
        }
    }

    /// Sidebar click: re-clicking the active category folds it, any other
    /// category becomes active
    pub fn select_category_from_sidebar(&mut self, id: &str) {
        if self.ui.active_category_id.as_deref() == Some(id) {
            self.toggle_category_expanded(id);
        } else {
            self.set_active_category(Some(id));
        }
    }

    /// Select a video; the summary panel is open iff the selection is set
    pub fn set_selected_video(&mut self, id: Option<&str>) {
        self.ui.selected_video_id = id.map(str::to_string);
        self.ui.is_summary_panel_open = id.is_some();
    }

    pub fn toggle_add_channel_modal(&mut self) {
        self.ui.is_add_channel_modal_open = !self.ui.is_add_channel_modal_open;
    }

    /// Open or close the summary panel. Closing drops the selection.
    pub fn toggle_summary_panel(&mut self) {
        if self.ui.is_summary_panel_open {
            self.ui.selected_video_id = None;
        }
        self.ui.is_summary_panel_open = !self.ui.is_summary_panel_open;
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.ui.filters.status = filter;
    }

    pub fn set_duration_filter(&mut self, filter: DurationFilter) {
        self.ui.filters.duration = filter;
    }

    pub fn set_date_filter(&mut self, filter: DateFilter) {
        self.ui.filters.date = filter;
    }

    pub fn reset_filters(&mut self) {
        self.ui.filters = VideoFilters::default();
    }

    /// Drop UI references to entities that no longer exist
    fn clear_dangling_selection(&mut self) {
        if let Some(id) = self.ui.active_category_id.clone() {
            if self.category(&id).is_none() {
                self.set_active_category(None);
            }
        }
        if let Some(id) = self.ui.active_channel_id.clone() {
            if self.channel(&id).is_none() {
                self.set_active_channel(None);
            }
        }
        if let Some(id) = self.ui.selected_video_id.clone() {
            if self.video(&id).is_none() {
                self.set_selected_video(None);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Derived queries
    // ------------------------------------------------------------------------

    /// Videos of every channel filed under the category
    pub fn videos_by_category(&self, category_id: &str) -> Vec<&Video> {
        let channel_ids: HashSet<&str> = self
            .channels
            .iter()
            .filter(|ch| ch.category_id == category_id)
            .map(|ch| ch.id.as_str())
            .collect();

        self.videos
            .iter()
            .filter(|v| channel_ids.contains(v.channel_id.as_str()))
            .collect()
    }

    pub fn videos_by_channel(&self, channel_id: &str) -> Vec<&Video> {
        self.videos
            .iter()
            .filter(|v| v.channel_id == channel_id)
            .collect()
    }

    pub fn channels_by_category(&self, category_id: &str) -> Vec<&Channel> {
        self.channels
            .iter()
            .filter(|ch| ch.category_id == category_id)
            .collect()
    }

    pub fn new_videos_count(&self, category_id: &str) -> usize {
        self.videos_by_category(category_id)
            .into_iter()
            .filter(|v| v.is_new())
            .count()
    }

    pub fn new_videos_count_by_channel(&self, channel_id: &str) -> usize {
        self.videos
            .iter()
            .filter(|v| v.channel_id == channel_id && v.is_new())
            .count()
    }

    pub fn total_new_videos(&self) -> usize {
        self.videos.iter().filter(|v| v.is_new()).count()
    }

    /// Videos of the active view, narrowed by the active filters
    pub fn filtered_videos(&self, now: DateTime<Utc>) -> Vec<&Video> {
        let ui = &self.ui;
        let base: Vec<&Video> = match (ui.active_view, &ui.active_channel_id, &ui.active_category_id) {
            (ActiveView::Channel, Some(channel_id), _) => self.videos_by_channel(channel_id),
            (ActiveView::Category, _, Some(category_id)) => self.videos_by_category(category_id),
            _ => self.videos.iter().collect(),
        };

        self.ui.filters.apply(base, now)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            new_videos: self.total_new_videos(),
            pending_videos: self
                .videos
                .iter()
                .filter(|v| v.status == VideoStatus::Pending)
                .count(),
            summarized_videos: self.videos.iter().filter(|v| v.has_summary()).count(),
        }
    }

    /// Categories that have new videos, each with up to `limit` of them
    pub fn category_highlights(&self, limit: usize) -> Vec<CategoryHighlight<'_>> {
        self.categories
            .iter()
            .filter_map(|category| {
                let new_videos: Vec<&Video> = self
                    .videos_by_category(&category.id)
                    .into_iter()
                    .filter(|v| v.is_new())
                    .collect();

                if new_videos.is_empty() {
                    return None;
                }

                Some(CategoryHighlight {
                    category,
                    new_count: new_videos.len(),
                    videos: new_videos.into_iter().take(limit).collect(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;

    #[test]
    fn test_seed_store_counts() {
        let store = seed::default_store();
        assert_eq!(store.categories().len(), 4);
        assert_eq!(store.new_videos_count("devops"), 4);
        assert_eq!(store.new_videos_count("personal"), 0);
        assert_eq!(store.new_videos_count_by_channel("nana"), 2);
    }

    #[test]
    fn test_set_active_view_dashboard_clears_category() {
        let mut store = seed::default_store();
        store.set_active_category(Some("devops"));
        assert_eq!(store.ui().active_view, ActiveView::Category);

        store.set_active_view(ActiveView::Settings);
        assert_eq!(store.ui().active_category_id.as_deref(), Some("devops"));

        store.set_active_view(ActiveView::Dashboard);
        assert!(store.ui().active_category_id.is_none());
    }

    #[test]
    fn test_set_active_category_none_returns_to_dashboard() {
        let mut store = seed::default_store();
        store.set_active_category(Some("ux-ui"));
        store.set_active_category(None);

        assert_eq!(store.ui().active_view, ActiveView::Dashboard);
        assert!(store.ui().active_category_id.is_none());
    }

    #[test]
    fn test_active_channel_follows_its_category() {
        let mut store = seed::default_store();
        store.set_active_channel(Some("the-futur"));

        assert_eq!(store.ui().active_view, ActiveView::Channel);
        assert_eq!(store.ui().active_category_id.as_deref(), Some("ux-ui"));

        store.set_active_channel(None);
        assert_eq!(store.ui().active_view, ActiveView::Category);
    }

    #[test]
    fn test_sidebar_click_toggles_active_category() {
        let mut store = seed::default_store();
        assert!(store.category("devops").unwrap().is_expanded);

        store.select_category_from_sidebar("devops");
        assert_eq!(store.ui().active_category_id.as_deref(), Some("devops"));
        assert!(store.category("devops").unwrap().is_expanded);

        store.select_category_from_sidebar("devops");
        assert!(!store.category("devops").unwrap().is_expanded);
    }

    #[test]
    fn test_summary_panel_tracks_selection() {
        let mut store = seed::default_store();

        store.set_selected_video(Some("v3"));
        assert!(store.ui().is_summary_panel_open);
        assert_eq!(store.selected_video().unwrap().id, "v3");

        store.toggle_summary_panel();
        assert!(!store.ui().is_summary_panel_open);
        assert!(store.ui().selected_video_id.is_none());

        store.set_selected_video(None);
        assert!(!store.ui().is_summary_panel_open);
    }

    #[test]
    fn test_add_channel_modal_toggle() {
        let mut store = seed::default_store();
        store.toggle_add_channel_modal();
        assert!(store.ui().is_add_channel_modal_open);
        store.toggle_add_channel_modal();
        assert!(!store.ui().is_add_channel_modal_open);
    }

    #[test]
    fn test_deleting_active_category_resets_selection() {
        let mut store = seed::default_store();
        store.set_active_channel(Some("nana"));
        store.set_selected_video(Some("v1"));

        store.delete_category("devops");

        assert_eq!(store.ui().active_view, ActiveView::Dashboard);
        assert!(store.ui().active_category_id.is_none());
        assert!(store.ui().active_channel_id.is_none());
        assert!(store.ui().selected_video_id.is_none());
        assert!(!store.ui().is_summary_panel_open);
    }

    #[test]
    fn test_filtered_videos_uses_active_view() {
        let mut store = seed::default_store();
        let now = seed::reference_now();

        store.set_active_channel(Some("nana"));
        assert_eq!(store.filtered_videos(now).len(), 5);

        store.set_status_filter(StatusFilter::Only(VideoStatus::New));
        assert_eq!(store.filtered_videos(now).len(), 2);

        store.set_active_view(ActiveView::Dashboard);
        assert_eq!(store.filtered_videos(now).len(), store.total_new_videos());

        store.reset_filters();
        assert_eq!(store.filtered_videos(now).len(), store.videos().len());
    }

    #[test]
    fn test_dashboard_stats_and_highlights() {
        let store = seed::default_store();
        let stats = store.dashboard_stats();

        assert_eq!(stats.new_videos, store.total_new_videos());
        assert_eq!(stats.summarized_videos, 2);
        assert_eq!(stats.pending_videos, 6);

        let highlights = store.category_highlights(DASHBOARD_HIGHLIGHTS_PER_CATEGORY);
        assert_eq!(highlights.len(), 3);
        assert!(highlights.iter().all(|h| h.videos.len() <= 3));
        assert_eq!(highlights[0].category.id, "devops");
        assert_eq!(highlights[0].new_count, 4);
    }

    #[test]
    fn test_add_tokens_used_accumulates() {
        let mut store = seed::default_store();
        let before = store.settings().tokens_used;

        store.add_tokens_used(450);
        store.add_tokens_used(450);

        assert_eq!(store.settings().tokens_used, before + 900);
    }
}
