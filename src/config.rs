use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::roles::LeaveStatus;
use crate::store::Session;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub picker: PickerConfig,
    pub directory: DirectoryConfig,
    pub search: SearchConfig,
    pub request: RequestConfig,
    /// Signs this user in at startup
    pub session: Option<Session>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

/// Texts and timing for the approver search-select
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub label: String,
    pub placeholder: String,
    pub empty_message: String,
    pub debounce_ms: u64,
}

/// How to pass the search term to a search command
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Stdin,
    Arg,
}

/// Full employee list, loaded once and filtered locally
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Command + arguments printing JSONL directory records
    pub source: Vec<String>,
    pub timeout_ms: u64,
}

/// Per-term employee search. Takes precedence over `directory` when `source` is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub source: Vec<String>,
    pub input: InputMode,
    pub timeout_ms: u64,
}

/// The leave request an approver is being picked for
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub employee: String,
    pub kind: String,
    pub status: LeaveStatus,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 420.0,
        }
    }
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            label: "Approver".to_string(),
            placeholder: "Search employees...".to_string(),
            empty_message: "No employees found".to_string(),
            debounce_ms: 300,
        }
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            source: vec!["hrdesk-directory".to_string()],
            timeout_ms: 2000,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            source: Vec::new(),
            input: InputMode::default(),
            timeout_ms: 2000,
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            employee: "Unassigned".to_string(),
            kind: "Annual leave".to_string(),
            status: LeaveStatus::Pending,
        }
    }
}

impl PickerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl SearchConfig {
    pub fn is_enabled(&self) -> bool {
        !self.source.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl DirectoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse config: {}, using defaults", e);
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read config file: {}, using defaults", e);
            Config::default()
        }
    }
}

pub fn load() -> Config {
    load_from(&config_path())
}

fn config_path() -> PathBuf {
    // ~/.config/ (XDG convention) on every platform
    dirs::home_dir()
        .unwrap_or_default()
        .join(".config")
        .join("hrdesk")
        .join("config.toml")
}
