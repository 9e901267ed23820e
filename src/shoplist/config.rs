use crate::error::{Result, ShopError};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_KEY: &str = "shopping-list";
const DEFAULT_COUNTDOWN_KEY: &str = "countdown";
const DEFAULT_COUNTDOWN_FREQUENCY_SECS: u64 = 14 * 24 * 60 * 60;

pub const CONFIG_KEYS: &[&str] = &[
    "storage-key",
    "countdown-key",
    "countdown-frequency-secs",
    "seed-items",
];

/// Configuration for shoplist, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShopConfig {
    /// Storage slot holding the shopping list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Storage slot holding the countdown history
    #[serde(default = "default_countdown_key")]
    pub countdown_key: String,

    /// How long after a completion the chore is due again
    #[serde(default = "default_countdown_frequency_secs")]
    pub countdown_frequency_secs: u64,

    /// Items shown before anything has been saved
    #[serde(default = "default_seed_items")]
    pub seed_items: Vec<String>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_countdown_key() -> String {
    DEFAULT_COUNTDOWN_KEY.to_string()
}

fn default_countdown_frequency_secs() -> u64 {
    DEFAULT_COUNTDOWN_FREQUENCY_SECS
}

fn default_seed_items() -> Vec<String> {
    vec!["Coffee".to_string(), "Tea".to_string(), "Milk".to_string()]
}

fn frequency_from_secs(secs: u64) -> Option<TimeDelta> {
    i64::try_from(secs).ok().and_then(TimeDelta::try_seconds)
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            countdown_key: default_countdown_key(),
            countdown_frequency_secs: default_countdown_frequency_secs(),
            seed_items: default_seed_items(),
        }
    }
}

impl ShopConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ShopError::Io)?;
        let config: ShopConfig =
            serde_json::from_str(&content).map_err(ShopError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir).map_err(ShopError::Io)?;

        let content = serde_json::to_string_pretty(self).map_err(ShopError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(ShopError::Io)?;
        Ok(())
    }

    /// The configured frequency, clamped to `TimeDelta::MAX` when the stored
    /// number of seconds is out of range.
    pub fn countdown_frequency(&self) -> TimeDelta {
        frequency_from_secs(self.countdown_frequency_secs).unwrap_or(TimeDelta::MAX)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "storage-key" => Some(self.storage_key.clone()),
            "countdown-key" => Some(self.countdown_key.clone()),
            "countdown-frequency-secs" => Some(self.countdown_frequency_secs.to_string()),
            "seed-items" => Some(self.seed_items.join(", ")),
            _ => None,
        }
    }

    /// Set a value by its kebab-case name. Seed items are comma separated.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "storage-key" | "countdown-key" => {
                crate::store::validate_key(value).map_err(|e| e.to_string())?;
                if key == "storage-key" {
                    self.storage_key = value.to_string();
                } else {
                    self.countdown_key = value.to_string();
                }
            }
            "countdown-frequency-secs" => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| format!("Not a number of seconds: {}", value))?;
                if secs == 0 {
                    return Err("Countdown frequency must be positive".to_string());
                }
                if frequency_from_secs(secs).is_none() {
                    return Err(format!("Countdown frequency is too large: {}", value));
                }
                self.countdown_frequency_secs = secs;
            }
            "seed-items" => {
                self.seed_items = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
            }
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }
}
