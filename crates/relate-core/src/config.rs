//! TOML-based engine configuration.
//!
//! Holds the business thresholds the derivation rules run on, the focus
//! snooze distance, and the constants used to seed an upsell deal. The
//! defaults match the product rules; the file exists so they are tunable
//! configuration rather than magic numbers.
//!
//! Configuration is stored at `~/.config/relate/config.toml`
//! (`~/.config/relate-dev/` when `RELATE_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

/// Thresholds for suggestion derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// An open deal untouched for more than this many days is stalled.
    #[serde(default = "default_stalled_idle_days")]
    pub stalled_idle_days: i64,
    /// A won deal untouched for more than this many days enters the
    /// renewal/upsell window.
    #[serde(default = "default_upsell_idle_days")]
    pub upsell_idle_days: i64,
}

/// Focus-flow behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    /// How many days a snoozed engagement is pushed out.
    #[serde(default = "default_snooze_days")]
    pub snooze_days: i64,
}

/// Constants for seeding a new deal from an accepted upsell suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellConfig {
    /// New deal value = source value * this factor, rounded.
    #[serde(default = "default_value_factor")]
    pub value_factor: f64,
    /// Win probability (percent) the new deal starts with.
    #[serde(default = "default_reset_probability")]
    pub reset_probability: u32,
    /// Prefix for the new deal's title.
    #[serde(default = "default_title_prefix")]
    pub title_prefix: String,
    /// Tag attached to the new deal.
    #[serde(default = "default_tag")]
    pub tag: String,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/relate/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InboxConfig {
    #[serde(default)]
    pub triage: TriageConfig,
    #[serde(default)]
    pub focus: FocusConfig,
    #[serde(default)]
    pub upsell: UpsellConfig,
}

fn default_stalled_idle_days() -> i64 {
    7
}
fn default_upsell_idle_days() -> i64 {
    30
}
fn default_snooze_days() -> i64 {
    1
}
fn default_value_factor() -> f64 {
    1.2
}
fn default_reset_probability() -> u32 {
    30
}
fn default_title_prefix() -> String {
    "Upsell:".into()
}
fn default_tag() -> String {
    "Upsell".into()
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            stalled_idle_days: default_stalled_idle_days(),
            upsell_idle_days: default_upsell_idle_days(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            snooze_days: default_snooze_days(),
        }
    }
}

impl Default for UpsellConfig {
    fn default() -> Self {
        Self {
            value_factor: default_value_factor(),
            reset_probability: default_reset_probability(),
            title_prefix: default_title_prefix(),
            tag: default_tag(),
        }
    }
}

/// Returns `~/.config/relate[-dev]/` based on RELATE_ENV.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("RELATE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("relate-dev")
    } else {
        base_dir.join("relate")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
    Ok(dir)
}

impl InboxConfig {
    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults out if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
