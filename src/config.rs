//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Desktop browser identity sent with every request. Matches the Chrome 131
/// profile the client emulates, so the UA and the `sec-ch-ua` hints agree.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory root; search URLs and relative detail links hang off it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Address list, one per line
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// Export destination
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Export format
    #[serde(default)]
    pub format: OutputFormat,

    /// Lower bound of the pause between addresses, in milliseconds
    #[serde(default = "default_delay_min_ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the pause between addresses, in milliseconds
    #[serde(default = "default_delay_max_ms")]
    pub delay_max_ms: u64,

    /// Also pause after the final address
    #[serde(default)]
    pub trailing_delay: bool,

    /// Prefix exported phone numbers with `'` so spreadsheets keep them as text
    #[serde(default = "default_true")]
    pub phone_text_marker: bool,

    /// Export whatever was collected when a run is interrupted
    #[serde(default = "default_true")]
    pub export_partial: bool,
}

fn default_base_url() -> String {
    "https://www.firmy.cz".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_input() -> PathBuf {
    PathBuf::from("places.txt")
}

fn default_output() -> PathBuf {
    PathBuf::from("output.xlsx")
}

fn default_delay_min_ms() -> u64 {
    2000
}

fn default_delay_max_ms() -> u64 {
    4000
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            input: default_input(),
            output: default_output(),
            format: OutputFormat::Xlsx,
            delay_min_ms: default_delay_min_ms(),
            delay_max_ms: default_delay_max_ms(),
            trailing_delay: false,
            phone_text_marker: true,
            export_partial: true,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("firmy.toml");
        if local_config.exists() {
            debug!("Found firmy.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("firmy-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(base_url) = std::env::var("FIRMY_BASE_URL") {
            self.base_url = base_url;
        }

        if let Ok(user_agent) = std::env::var("FIRMY_USER_AGENT") {
            self.user_agent = user_agent;
        }

        if let Ok(proxy) = std::env::var("FIRMY_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("FIRMY_DELAY_MIN") {
            if let Ok(d) = delay.parse() {
                self.delay_min_ms = d;
            }
        }

        if let Ok(delay) = std::env::var("FIRMY_DELAY_MAX") {
            if let Ok(d) = delay.parse() {
                self.delay_max_ms = d;
            }
        }

        self
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook, one sheet
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use: xlsx, csv, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xlsx => write!(f, "xlsx"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
