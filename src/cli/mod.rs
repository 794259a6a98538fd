//! Command-line interface for contenthub.
//!
//! The CLI is the presentation layer: each command opens the curator, calls
//! store operations and renders the derived queries as text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::adapters::summary_export_filename;
use crate::config::{self, ResolvedConfig};
use crate::core::store::DASHBOARD_HIGHLIGHTS_PER_CATEGORY;
use crate::core::{ContentStore, Curator, DateFilter, DurationFilter, StatusFilter};
use crate::domain::{ActiveView, CategoryIcon, CategoryUpdate, SettingsUpdate, Video, VideoStatus};

/// contenthub - Curate YouTube channels, triage videos, read AI summaries
#[derive(Parser, Debug)]
#[command(name = "contenthub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show new and pending counts and the newest videos per category
    Dashboard,

    /// List categories with their channels and new-video counts
    Categories,

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Manage channels
    Channel {
        #[command(subcommand)]
        command: ChannelCommands,
    },

    /// List videos, optionally scoped and filtered
    Videos(VideosArgs),

    /// Set the triage status of a video
    Status {
        /// Video ID
        video_id: String,

        /// New status
        #[arg(value_enum)]
        status: TriageStatus,
    },

    /// Generate (or regenerate) the summary of a video
    Summarize {
        /// Video ID
        video_id: String,
    },

    /// Print the stored summary of a video
    Summary {
        /// Video ID
        video_id: String,

        /// Write the summary as markdown into this directory instead
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },

    /// Show resolved configuration (debug)
    Config,

    /// Discard all data and restore the built-in dataset
    Reset {
        /// Required to confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Display name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Category ID
        id: String,

        /// New display name
        name: String,
    },

    /// Change a category's icon or color
    Style {
        /// Category ID
        id: String,

        #[arg(long, value_enum)]
        icon: Option<IconArg>,

        /// CSS color, e.g. "#22c55e"
        #[arg(long)]
        color: Option<String>,
    },

    /// Expand or collapse a category in the sidebar
    Toggle {
        /// Category ID
        id: String,
    },

    /// Delete a category with all its channels and videos
    Delete {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ChannelCommands {
    /// Validate a channel URL or @handle and add it to a category
    Add {
        /// Channel URL or @handle
        reference: String,

        /// Category ID (defaults to the first category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Move a channel to another category
    Move {
        /// Channel ID
        id: String,

        /// Target category ID
        category: String,
    },

    /// Remove a channel and its videos
    Remove {
        /// Channel ID
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print settings and token usage
    Show,

    /// Change one or more settings
    Set {
        #[arg(long)]
        api_key: Option<String>,

        /// Summary prompt text
        #[arg(long, conflicts_with = "prompt_file")]
        prompt: Option<String>,

        /// Read the summary prompt from a file
        #[arg(long)]
        prompt_file: Option<PathBuf>,

        /// Monthly token budget
        #[arg(long)]
        limit: Option<u64>,

        /// Overwrite the tokens-used counter (e.g. 0 at the start of a period)
        #[arg(long)]
        tokens_used: Option<u64>,
    },

    /// Check the stored API key
    TestKey,
}

#[derive(Args, Debug)]
pub struct VideosArgs {
    /// Only videos of channels in this category
    #[arg(long, conflicts_with = "channel")]
    pub category: Option<String>,

    /// Only videos of this channel
    #[arg(long)]
    pub channel: Option<String>,

    #[arg(short, long, value_enum, default_value = "all")]
    pub status: StatusArg,

    #[arg(short, long, value_enum, default_value = "all")]
    pub duration: DurationArg,

    #[arg(long, value_enum, default_value = "all")]
    pub date: DateArg,
}

/// Triage status for CLI (maps to VideoStatus)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TriageStatus {
    New,
    Watched,
    Pending,
    NotInterested,
}

impl From<TriageStatus> for VideoStatus {
    fn from(s: TriageStatus) -> Self {
        match s {
            TriageStatus::New => VideoStatus::New,
            TriageStatus::Watched => VideoStatus::Watched,
            TriageStatus::Pending => VideoStatus::Pending,
            TriageStatus::NotInterested => VideoStatus::NotInterested,
        }
    }
}

/// Status filter for CLI (maps to StatusFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    All,
    New,
    Watched,
    Pending,
    NotInterested,
}

impl From<StatusArg> for StatusFilter {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::All => StatusFilter::All,
            StatusArg::New => StatusFilter::Only(VideoStatus::New),
            StatusArg::Watched => StatusFilter::Only(VideoStatus::Watched),
            StatusArg::Pending => StatusFilter::Only(VideoStatus::Pending),
            StatusArg::NotInterested => StatusFilter::Only(VideoStatus::NotInterested),
        }
    }
}

/// Duration bucket for CLI (maps to DurationFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DurationArg {
    All,
    /// Under 10 minutes
    Short,
    /// 10 to 30 minutes
    Medium,
    /// 30 minutes or more
    Long,
}

impl From<DurationArg> for DurationFilter {
    fn from(d: DurationArg) -> Self {
        match d {
            DurationArg::All => DurationFilter::All,
            DurationArg::Short => DurationFilter::Short,
            DurationArg::Medium => DurationFilter::Medium,
            DurationArg::Long => DurationFilter::Long,
        }
    }
}

/// Recency bucket for CLI (maps to DateFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateArg {
    All,
    /// Last 24 hours
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
}

impl From<DateArg> for DateFilter {
    fn from(d: DateArg) -> Self {
        match d {
            DateArg::All => DateFilter::All,
            DateArg::Today => DateFilter::Today,
            DateArg::Week => DateFilter::Week,
            DateArg::Month => DateFilter::Month,
        }
    }
}

/// Category icon for CLI (maps to CategoryIcon)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum IconArg {
    Server,
    TrendingUp,
    Palette,
    User,
    Folder,
}

impl From<IconArg> for CategoryIcon {
    fn from(i: IconArg) -> Self {
        match i {
            IconArg::Server => CategoryIcon::Server,
            IconArg::TrendingUp => CategoryIcon::TrendingUp,
            IconArg::Palette => CategoryIcon::Palette,
            IconArg::User => CategoryIcon::User,
            IconArg::Folder => CategoryIcon::Folder,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = config::config()?;

        if let Commands::Config = self.command {
            return show_config(config);
        }

        let mut curator = Curator::open(config).await?;

        match self.command {
            Commands::Dashboard => show_dashboard(&curator),
            Commands::Categories => list_categories(&curator),
            Commands::Category { command } => execute_category(&mut curator, command).await,
            Commands::Channel { command } => execute_channel(&mut curator, command).await,
            Commands::Videos(args) => list_videos(&mut curator, args),
            Commands::Status { video_id, status } => {
                set_status(&mut curator, &video_id, status.into()).await
            }
            Commands::Summarize { video_id } => summarize(&mut curator, &video_id).await,
            Commands::Summary { video_id, export } => {
                show_summary(&curator, &video_id, export).await
            }
            Commands::Settings { command } => execute_settings(&mut curator, command).await,
            Commands::Reset { yes } => reset(&mut curator, yes).await,
            Commands::Config => Ok(()),
        }
    }
}

/// Show resolved configuration
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("Home:            {}", config.home.display());
    println!("Snapshot:        {}", config.snapshot_path().display());
    match &config.config_file {
        Some(path) => println!("Config file:     {}", path.display()),
        None => println!("Config file:     (none, using defaults)"),
    }
    println!("Validation stub: {:?}", config.stubs.validation_delay);
    println!("Summary stub:    {:?}", config.stubs.summary_delay);
    println!("Tokens/summary:  {}", config.stubs.tokens_per_summary);
    println!("Adapter timeout: {:?}", config.stubs.timeout);
    Ok(())
}

fn show_dashboard(curator: &Curator) -> Result<()> {
    let store = curator.store();
    let stats = store.dashboard_stats();

    println!("New videos:          {}", stats.new_videos);
    println!("Pending review:      {}", stats.pending_videos);
    println!("Summaries generated: {}", stats.summarized_videos);

    for highlight in store.category_highlights(DASHBOARD_HIGHLIGHTS_PER_CATEGORY) {
        println!(
            "\n{} ({} new)",
            highlight.category.name, highlight.new_count
        );
        for video in highlight.videos {
            println!("  {}", video_line(video));
        }
    }

    Ok(())
}

fn list_categories(curator: &Curator) -> Result<()> {
    let store = curator.store();

    if store.categories().is_empty() {
        println!("No categories");
        return Ok(());
    }

    for category in store.categories() {
        let marker = if category.is_expanded { "▾" } else { "▸" };
        println!(
            "{} {} [{}] {} {} ({} new)",
            marker,
            category.name,
            category.id,
            category.icon,
            category.color,
            store.new_videos_count(&category.id)
        );

        if category.is_expanded {
            for channel in store.channels_by_category(&category.id) {
                println!(
                    "    {:<28} {:<20} {} new",
                    channel.name,
                    channel.id,
                    store.new_videos_count_by_channel(&channel.id)
                );
            }
        }
    }

    Ok(())
}

async fn execute_category(curator: &mut Curator, command: CategoryCommands) -> Result<()> {
    match command {
        CategoryCommands::Add { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                anyhow::bail!("Category name is empty");
            }
            let id = curator.mutate(|store| store.add_category(name)).await?;
            println!("Added category {}", id);
        }
        CategoryCommands::Rename { id, name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                anyhow::bail!("Category name is empty");
            }
            require_category(curator.store(), &id)?;
            curator
                .mutate(|store| store.update_category(&id, CategoryUpdate::default().name(name)))
                .await?;
            println!("Renamed category {}", id);
        }
        CategoryCommands::Style { id, icon, color } => {
            require_category(curator.store(), &id)?;
            let update = CategoryUpdate {
                icon: icon.map(Into::into),
                color,
                ..Default::default()
            };
            curator
                .mutate(|store| store.update_category(&id, update))
                .await?;
            println!("Updated category {}", id);
        }
        CategoryCommands::Toggle { id } => {
            require_category(curator.store(), &id)?;
            curator
                .mutate(|store| store.toggle_category_expanded(&id))
                .await?;
        }
        CategoryCommands::Delete { id } => {
            require_category(curator.store(), &id)?;
            let channels = curator.store().channels_by_category(&id).len();
            let videos = curator.store().videos_by_category(&id).len();
            curator.mutate(|store| store.delete_category(&id)).await?;
            println!(
                "Deleted category {} ({} channels, {} videos)",
                id, channels, videos
            );
        }
    }
    Ok(())
}

async fn execute_channel(curator: &mut Curator, command: ChannelCommands) -> Result<()> {
    match command {
        ChannelCommands::Add {
            reference,
            category,
        } => {
            let category_id = match category {
                Some(id) => {
                    require_category(curator.store(), &id)?;
                    id
                }
                None => curator
                    .store()
                    .categories()
                    .first()
                    .map(|c| c.id.clone())
                    .context("No categories exist; create one first")?,
            };

            curator.update_ui(|store| store.toggle_add_channel_modal());
            eprintln!("Validating {}...", reference.trim());
            let added = curator
                .add_channel_from_reference(&reference, &category_id)
                .await?;
            curator.update_ui(|store| store.toggle_add_channel_modal());

            match added {
                Ok(id) => {
                    let channel = curator.store().channel(&id).context("Channel vanished after add")?;
                    println!("Added {} [{}] to {}", channel.name, channel.id, category_id);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        ChannelCommands::Move { id, category } => {
            require_channel(curator.store(), &id)?;
            require_category(curator.store(), &category)?;
            curator
                .mutate(|store| store.move_channel(&id, &category))
                .await?;
            println!("Moved channel {} to {}", id, category);
        }
        ChannelCommands::Remove { id } => {
            require_channel(curator.store(), &id)?;
            let videos = curator.store().videos_by_channel(&id).len();
            curator.mutate(|store| store.remove_channel(&id)).await?;
            println!("Removed channel {} ({} videos)", id, videos);
        }
    }
    Ok(())
}

fn list_videos(curator: &mut Curator, args: VideosArgs) -> Result<()> {
    if let Some(ref id) = args.category {
        require_category(curator.store(), id)?;
    }
    if let Some(ref id) = args.channel {
        require_channel(curator.store(), id)?;
    }

    curator.update_ui(|store| {
        match (&args.channel, &args.category) {
            (Some(channel), _) => store.set_active_channel(Some(channel.as_str())),
            (None, Some(category)) => store.set_active_category(Some(category.as_str())),
            (None, None) => store.set_active_view(ActiveView::Dashboard),
        }
        store.set_status_filter(args.status.into());
        store.set_duration_filter(args.duration.into());
        store.set_date_filter(args.date.into());
    });

    let videos = curator.store().filtered_videos(Utc::now());
    if videos.is_empty() {
        println!("No videos match these filters");
        return Ok(());
    }

    println!(
        "{:<6} {:<15} {:<9} {:<3} {:<24} {}",
        "ID", "STATUS", "LENGTH", "AI", "CHANNEL", "TITLE"
    );
    println!("{}", "-".repeat(100));
    for video in videos {
        println!("{}", video_line(video));
    }

    Ok(())
}

async fn set_status(curator: &mut Curator, video_id: &str, status: VideoStatus) -> Result<()> {
    require_video(curator.store(), video_id)?;
    curator
        .mutate(|store| store.update_video_status(video_id, status))
        .await?;
    println!("{} → {}", video_id, status);
    Ok(())
}

async fn summarize(curator: &mut Curator, video_id: &str) -> Result<()> {
    require_video(curator.store(), video_id)?;
    curator.update_ui(|store| store.set_selected_video(Some(video_id)));

    eprintln!("Generating summary...");
    let outcome = curator
        .summarize_video(video_id)
        .await?
        .with_context(|| format!("Video not found: {}", video_id))?;

    if let Some(summary) = curator.store().selected_video().and_then(|v| v.summary.as_deref()) {
        println!("{}", summary);
    }
    eprintln!(
        "\n[{} tokens used, {} this period]",
        outcome.tokens_consumed, outcome.tokens_used
    );
    if outcome.over_budget {
        eprintln!("[warning: monthly token budget exceeded]");
    }

    Ok(())
}

async fn show_summary(curator: &Curator, video_id: &str, export: Option<PathBuf>) -> Result<()> {
    let video = require_video(curator.store(), video_id)?;
    let Some(summary) = video.summary.as_deref() else {
        println!(
            "No summary yet for '{}'. Run: contenthub summarize {}",
            video.title, video.id
        );
        return Ok(());
    };

    match export {
        Some(dir) => {
            tokio::fs::create_dir_all(&dir)
                .await
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            let path = dir.join(summary_export_filename(&video.title));
            tokio::fs::write(&path, summary)
                .await
                .with_context(|| format!("Failed to write summary: {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            println!("{}", summary);
            if let Some(at) = video.summary_generated_at {
                eprintln!("\n[Generated {}]", at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
    }

    Ok(())
}

async fn execute_settings(curator: &mut Curator, command: SettingsCommands) -> Result<()> {
    match command {
        SettingsCommands::Show => {
            curator.update_ui(|store| store.set_active_view(ActiveView::Settings));
            let settings = curator.store().settings();

            let key = if settings.api_key.is_empty() {
                "(not set)".to_string()
            } else {
                settings.masked_api_key()
            };
            println!("API key:      {}", key);
            println!(
                "Token usage:  {} / {} ({:.1}%)",
                settings.tokens_used,
                settings.monthly_token_limit,
                settings.usage_percent().min(100.0)
            );
            println!("Remaining:    {}", settings.remaining_tokens());
            println!("Est. cost:    ${:.4}", settings.estimated_cost_usd());
            println!("\nSummary prompt:\n{}", settings.summary_prompt);
        }
        SettingsCommands::Set {
            api_key,
            prompt,
            prompt_file,
            limit,
            tokens_used,
        } => {
            let prompt = match prompt_file {
                Some(path) => Some(
                    tokio::fs::read_to_string(&path)
                        .await
                        .with_context(|| format!("Failed to read prompt file: {}", path.display()))?,
                ),
                None => prompt,
            };

            let update = SettingsUpdate {
                api_key,
                summary_prompt: prompt,
                monthly_token_limit: limit,
                tokens_used,
            };
            if update.is_empty() {
                anyhow::bail!("Nothing to change. See: contenthub settings set --help");
            }

            curator.mutate(|store| store.update_settings(update)).await?;
            println!("Settings updated");
        }
        SettingsCommands::TestKey => match curator.test_api_key().await {
            Ok(()) => println!("API key OK"),
            Err(e) => {
                eprintln!("API key check failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }
    Ok(())
}

async fn reset(curator: &mut Curator, yes: bool) -> Result<()> {
    if !yes {
        anyhow::bail!("This discards all categories, channels, videos and settings. Re-run with --yes");
    }
    curator.reset_to_seed().await?;
    println!("Restored the built-in dataset");
    Ok(())
}

/// One-line rendering of a video for lists
fn video_line(video: &Video) -> String {
    format!(
        "{:<6} {:<15} {:<9} {:<3} {:<24} {}",
        video.id,
        video.status.to_string(),
        video.duration,
        if video.has_summary() { "✓" } else { "" },
        truncate(&video.channel_name, 24),
        video.title
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn require_category<'a>(store: &'a ContentStore, id: &str) -> Result<&'a crate::domain::Category> {
    store
        .category(id)
        .with_context(|| format!("Category not found: {}", id))
}

fn require_channel<'a>(store: &'a ContentStore, id: &str) -> Result<&'a crate::domain::Channel> {
    store
        .channel(id)
        .with_context(|| format!("Channel not found: {}", id))
}

fn require_video<'a>(store: &'a ContentStore, id: &str) -> Result<&'a Video> {
    store
        .video(id)
        .with_context(|| format!("Video not found: {}", id))
}
