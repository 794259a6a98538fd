//! Configuration for contenthub.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CONTENTHUB_HOME)
//! 2. Config file (.contenthub/config.yaml)
//! 3. Defaults (~/.contenthub)
//!
//! Config file discovery:
//! - Searches current directory and parents for .contenthub/config.yaml
//! - Paths in config file are relative to the .contenthub/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::mock::{
    DEFAULT_SUMMARY_DELAY, DEFAULT_TOKENS_PER_SUMMARY, DEFAULT_VALIDATION_DELAY,
};
use crate::core::snapshot::SNAPSHOT_KEY;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Environment variable overriding the home directory
pub const HOME_ENV: &str = "CONTENTHUB_HOME";

const DEFAULT_STUB_TIMEOUT_SECONDS: u64 = 30;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub stubs: Option<StubsConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to the .contenthub/ directory)
    pub home: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StubsConfig {
    pub validation_delay_ms: Option<u64>,
    pub summary_delay_ms: Option<u64>,
    pub tokens_per_summary: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absolute path to the contenthub home (snapshot lives here)
    pub home: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Mock adapter tuning
    pub stubs: StubSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubSettings {
    pub validation_delay: Duration,
    pub summary_delay: Duration,
    pub tokens_per_summary: u64,
    /// Upper bound on any single adapter call
    pub timeout: Duration,
}

impl Default for StubSettings {
    fn default() -> Self {
        Self {
            validation_delay: DEFAULT_VALIDATION_DELAY,
            summary_delay: DEFAULT_SUMMARY_DELAY,
            tokens_per_summary: DEFAULT_TOKENS_PER_SUMMARY,
            timeout: Duration::from_secs(DEFAULT_STUB_TIMEOUT_SECONDS),
        }
    }
}

impl StubSettings {
    fn from_file(stubs: Option<&StubsConfig>) -> Self {
        let defaults = Self::default();
        let Some(stubs) = stubs else {
            return defaults;
        };

        Self {
            validation_delay: stubs
                .validation_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.validation_delay),
            summary_delay: stubs
                .summary_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.summary_delay),
            tokens_per_summary: stubs
                .tokens_per_summary
                .unwrap_or(defaults.tokens_per_summary),
            timeout: stubs
                .timeout_seconds
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

impl ResolvedConfig {
    /// Configuration rooted at an explicit home directory with default stubs
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            config_file: None,
            stubs: StubSettings::default(),
        }
    }

    /// Path of the snapshot file ($CONTENTHUB_HOME/contenthub-storage.json)
    pub fn snapshot_path(&self) -> PathBuf {
        self.home.join(format!("{}.json", SNAPSHOT_KEY))
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".contenthub").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".contenthub");

    let config_file = find_config_file();
    let env_home = std::env::var(HOME_ENV).ok().map(PathBuf::from);

    let (home, stubs) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;
        let config_dir = config_path.parent().unwrap_or(Path::new("."));

        let home = match (env_home, config.paths.home.as_deref()) {
            (Some(env_home), _) => env_home,
            (None, Some(home_path)) => resolve_path(config_dir, home_path),
            (None, None) => default_home,
        };

        (home, StubSettings::from_file(config.stubs.as_ref()))
    } else {
        (env_home.unwrap_or(default_home), StubSettings::default())
    };

    Ok(ResolvedConfig {
        home,
        config_file,
        stubs,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".contenthub");
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
version: "1.0"
paths:
  home: ./state
stubs:
  validation_delay_ms: 0
  summary_delay_ms: 250
"#
        )
        .unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./state".to_string()));

        let stubs = StubSettings::from_file(config.stubs.as_ref());
        assert_eq!(stubs.validation_delay, Duration::ZERO);
        assert_eq!(stubs.summary_delay, Duration::from_millis(250));
        // Unset fields keep their defaults
        assert_eq!(stubs.tokens_per_summary, DEFAULT_TOKENS_PER_SUMMARY);
        assert_eq!(stubs.timeout, Duration::from_secs(DEFAULT_STUB_TIMEOUT_SECONDS));
    }

    #[test]
    fn test_missing_stubs_section_uses_defaults() {
        let config: ConfigFile = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
        assert_eq!(StubSettings::from_file(config.stubs.as_ref()), StubSettings::default());
    }

    #[test]
    fn test_snapshot_path() {
        let config = ResolvedConfig::with_home("/test/.contenthub");
        assert_eq!(
            config.snapshot_path(),
            PathBuf::from("/test/.contenthub/contenthub-storage.json")
        );
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project/.contenthub");

        assert_eq!(
            resolve_path(&base, "./state"),
            PathBuf::from("/home/user/project/.contenthub/state")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
