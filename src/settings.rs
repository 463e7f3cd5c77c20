//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/blockfall/settings.toml (or platform equivalent)

use blockfall::{ConfigError, EngineConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board size, timings and scoring
    pub engine: EngineConfig,
    pub keys: KeyBindings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(with = "key_list")]
    pub move_left: Vec<String>,
    #[serde(with = "key_list")]
    pub move_right: Vec<String>,
    #[serde(with = "key_list")]
    pub soft_drop: Vec<String>,
    #[serde(with = "key_list")]
    pub rotate: Vec<String>,
    #[serde(with = "key_list")]
    pub pause: Vec<String>,
    #[serde(with = "key_list")]
    pub reset: Vec<String>,
    #[serde(with = "key_list")]
    pub quit: Vec<String>,
}

/// A binding written as `"p"` or `["q", "Esc"]`
mod key_list {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        Ok(match OneOrMany::deserialize(deserializer)? {
            OneOrMany::One(key) => vec![key],
            OneOrMany::Many(keys) => keys,
        })
    }

    pub fn serialize<S: Serializer>(keys: &[String], serializer: S) -> Result<S::Ok, S::Error> {
        match keys {
            [only] => serializer.serialize_str(only),
            _ => keys.serialize(serializer),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            rotate: vec!["r".to_string(), "Up".to_string()],
            pause: vec!["p".to_string()],
            reset: vec!["n".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Parse and validate settings text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.engine.validate()?;
        Ok(settings)
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), String> {
        let Some(dir) = Self::config_dir() else {
            return Err("Could not determine config directory".to_string());
        };

        let Some(path) = Self::settings_path() else {
            return Err("Could not determine settings path".to_string());
        };

        // Create directory if needed
        fs::create_dir_all(&dir).map_err(|e| format!("Failed to create config dir: {}", e))?;

        let contents =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize: {}", e))?;

        fs::write(&path, contents).map_err(|e| format!("Failed to write settings: {}", e))?;

        Ok(())
    }
}
