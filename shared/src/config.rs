//! Configuration persistence utilities
//!
//! Provides the per-widget TOML configuration file, a [`ConfigStore`] backed by
//! it, and the plain-text state file holding the current time.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::host::{ConfigStore, StateStore};

/// Name of the file holding the current time inside a widget's data directory
pub const STATE_FILE_NAME: &str = "curtime";

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error while reading/writing config
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Host-side settings of a timer widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Milliseconds between ticks
    pub update_interval_ms: u64,
    /// Height of the clickable header strip that edits the zero-point
    pub header_height: f32,
    /// Command run when the alarm fires; empty means log only
    pub alarm_command: Vec<String>,
    /// Dialog command; title and seed value are appended as arguments
    pub prompt_command: Vec<String>,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            update_interval_ms: 1000,
            header_height: 70.0,
            alarm_command: Vec::new(),
            prompt_command: vec!["kdialog".to_string(), "--inputbox".to_string()],
        }
    }
}

/// Persisted widget configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub settings: WidgetSettings,
    /// Free-form entries such as `zerotime` and `alarmtime`
    pub entries: BTreeMap<String, String>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "stoptimer", "stoptimer")
}

/// Get the base configuration directory for all widgets
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the base data directory for all widgets
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Get the configuration file path for a specific widget
pub fn config_path(widget_name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(format!("{}.toml", widget_name)))
}

/// Get the state file path for a specific widget
pub fn state_path(widget_name: &str) -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(widget_name).join(STATE_FILE_NAME))
}

/// Load configuration from an explicit path
///
/// Returns `None` if the file doesn't exist yet.
/// Returns an error if the file exists but can't be parsed.
pub fn load_config_from<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let config: T = toml::from_str(&contents)?;
    Ok(Some(config))
}

/// Save configuration to an explicit path
pub fn save_config_to<T: Serialize>(path: &Path, config: &T) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// [`ConfigStore`] over a widget's TOML file. Every write rewrites the file.
#[derive(Debug)]
pub struct TomlConfigStore {
    path: PathBuf,
    config: WidgetConfig,
}

impl TomlConfigStore {
    /// Open the store at `path`; a missing file starts from defaults
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let config = load_config_from(&path)?.unwrap_or_default();
        Ok(Self { path, config })
    }

    /// Open the store for a widget in the user's config directory
    pub fn for_widget(widget_name: &str) -> Result<Self, ConfigError> {
        Self::open(config_path(widget_name).ok_or(ConfigError::NoConfigDir)?)
    }

    /// Store at `path` holding defaults, used when the file can't be read
    pub fn with_defaults(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: WidgetConfig::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &WidgetSettings {
        &self.config.settings
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        save_config_to(&self.path, &self.config)
    }
}

impl ConfigStore for TomlConfigStore {
    fn read_entry(&self, key: &str) -> Option<String> {
        self.config.entries.get(key).cloned()
    }

    fn write_entry(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.config
            .entries
            .insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// [`StateStore`] over a single plain-text file
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// State file for a widget in the user's data directory
    pub fn for_widget(widget_name: &str) -> Result<Self, ConfigError> {
        state_path(widget_name)
            .map(Self::new)
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for StateFile {
    fn load_state(&self) -> Result<Option<String>, ConfigError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_state(&mut self, value: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        Ok(())
    }
}
