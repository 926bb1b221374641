use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, ops::Range, path::PathBuf};

/// Earliest historical year sampled when nothing else is configured.
pub const DEFAULT_FIRST_YEAR: i32 = 2015;

/// The span of past years mined for each trip date.
///
/// `reference_year` is exclusive and must be injected by the caller (the CLI
/// passes the current wall-clock year); the library itself never reads the
/// clock, which keeps predictions deterministic under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoricalWindow {
    pub first_year: i32,
    /// Exclusive upper bound, typically the current year.
    pub reference_year: i32,
}

impl HistoricalWindow {
    pub fn new(first_year: i32, reference_year: i32) -> Self {
        Self { first_year, reference_year }
    }

    /// Years to sample, oldest first. Empty when the window is inverted.
    pub fn years(&self) -> Range<i32> {
        self.first_year..self.reference_year
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// first_year = 2015
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weatherstack API key, entered via `trip-weather configure`.
    pub api_key: Option<String>,

    /// Earliest historical year to sample.
    #[serde(default = "default_first_year")]
    pub first_year: i32,
}

fn default_first_year() -> i32 {
    DEFAULT_FIRST_YEAR
}

impl Default for Config {
    fn default() -> Self {
        Self { api_key: None, first_year: DEFAULT_FIRST_YEAR }
    }
}

impl Config {
    /// Return the configured API key, or a hint to run `configure` first.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `trip-weather configure` and enter your Weatherstack API key."
            )
        })
    }

    /// Build the historical window ending just before `reference_year`.
    pub fn window(&self, reference_year: i32) -> HistoricalWindow {
        HistoricalWindow::new(self.first_year, reference_year)
    }

    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "trip-weather", "trip-weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
