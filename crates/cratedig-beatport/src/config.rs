use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for cratedig.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CRATEDIG_* prefix)
/// 3. Config file (~/.config/cratedig/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Artist string used in place of the artist list when a search result
    /// credits four or more artists.
    ///
    /// Can be set via:
    /// - ENV: CRATEDIG_VARIOUS_ARTISTS_MARKER
    /// - Config: various_artists_marker = "..."
    #[serde(default = "default_various_artists_marker")]
    pub various_artists_marker: String,

    /// Labels whose releases are dropped from search results.
    ///
    /// Compared case-insensitively.
    #[serde(default)]
    pub excluded_labels: Vec<String>,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of search results shown when the CLI is not given `--limit`.
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Logger settings.
    #[serde(default)]
    pub logging: twyg::Opts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            various_artists_marker: default_various_artists_marker(),
            excluded_labels: Vec::new(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            search_limit: default_search_limit(),
            logging: twyg::Opts::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/cratedig/config.toml
    /// Reads environment variables with CRATEDIG_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();
        if config_path.exists() {
            Self::load_from(Some(config_path))
        } else {
            Self::load_from(None)
        }
    }

    /// Load configuration from an explicit file (if any) plus environment
    /// variables.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if let Some(config_path) = config_path {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("cratedig");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?;

        log::debug!(
            "Loaded configuration with {} excluded labels",
            config.excluded_labels.len()
        );
        Ok(config)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Whether releases on `label` are filtered out of search results.
    pub fn is_excluded_label(&self, label: &str) -> bool {
        let label = label.to_lowercase();
        self.excluded_labels
            .iter()
            .any(|excluded| excluded.to_lowercase() == label)
    }
}

fn default_various_artists_marker() -> String {
    "Various Artists".to_string()
}

fn default_user_agent() -> String {
    format!("cratedig/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_search_limit() -> usize {
    10
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/cratedig/config.toml
/// - macOS: ~/Library/Application Support/cratedig/config.toml
/// - Windows: %APPDATA%\cratedig\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cratedig")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Cratedig Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CRATEDIG_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Artist string used when a search result credits four or more artists
#
# Can also be set via:
# - Environment: CRATEDIG_VARIOUS_ARTISTS_MARKER="VA"
various_artists_marker = "Various Artists"

# Labels whose releases never appear in search results (case-insensitive)
excluded_labels = []

# Per-request timeout in seconds
request_timeout_secs = 30

# Number of search results shown by default
search_limit = 10
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
