//! Configuration loading and management
//!
//! Handles parsing of `kanri.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{Accent, AppSettings};

pub const CONFIG_FILE: &str = "kanri.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Chat auto-reply configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Settings applied to a brand-new board
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Storage-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Directory for board snapshots; platform data dir when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Chat-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Whether a sent message schedules a teammate auto-reply
    #[serde(default = "default_auto_reply")]
    pub auto_reply: bool,

    /// Delay before the auto-reply fires, in milliseconds
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

fn default_auto_reply() -> bool {
    true
}

fn default_reply_delay_ms() -> u64 {
    900
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            auto_reply: default_auto_reply(),
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

/// Defaults seeded into the settings of a new board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_accent")]
    pub accent: String,

    #[serde(default)]
    pub compact_cards: bool,

    #[serde(default = "default_show_completed")]
    pub show_completed: bool,
}

fn default_accent() -> String {
    "teal".to_string()
}

fn default_show_completed() -> bool {
    true
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            accent: default_accent(),
            compact_cards: false,
            show_completed: default_show_completed(),
        }
    }
}

impl DefaultsConfig {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            compact_cards: self.compact_cards,
            show_completed: self.show_completed,
            accent: Accent::parse(&self.accent).unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load configuration from a `kanri.toml` file
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Resolve the effective data directory: explicit override first, then
    /// the config file, then the platform data directory.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.store.data_dir {
            return dir.clone();
        }
        default_data_dir()
    }

    fn validate(&self) -> crate::error::Result<()> {
        if Accent::parse(&self.defaults.accent).is_none() {
            return Err(crate::error::Error::InvalidConfig(format!(
                "defaults.accent: invalid accent '{}' (expected teal|blue|orange)",
                self.defaults.accent
            )));
        }
        if self.chat.reply_delay_ms > 60_000 {
            return Err(crate::error::Error::InvalidConfig(
                "chat.reply_delay_ms must be <= 60000".to_string(),
            ));
        }
        Ok(())
    }
}

/// Platform data directory for board snapshots, with a local fallback when
/// the platform has no project directory convention.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "kanri")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".kanri"))
}
