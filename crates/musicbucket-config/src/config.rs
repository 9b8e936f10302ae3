/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::presets::{default_presets, TierPreset};

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "MUSICBUCKET_DATA_DIR";

/// Smallest accepted history cap; a cap must keep the active snapshot.
const MIN_HISTORY_SNAPSHOTS: usize = 1;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Max snapshots kept per editing session. `None` = unbounded.
    pub max_history_snapshots: Option<usize>,
    /// Tiers a new board starts with, top tier first.
    pub default_tiers: Vec<TierPreset>,
    /// Where the board database lives. Empty = resolved default.
    pub data_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_history_snapshots: None,
            default_tiers: default_presets(),
            data_dir: String::new(),
        }
    }
}

impl AppConfig {
    /// Returns the config file path: exe directory + `musicbucket.json`.
    pub fn config_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join("musicbucket.json")))
            .unwrap_or_else(|| PathBuf::from("musicbucket.json"))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Return defaults on error (don't overwrite broken file)
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e:#}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }

    /// Resolves the data directory.
    ///
    /// Resolution order:
    /// 1. `MUSICBUCKET_DATA_DIR` environment variable
    /// 2. `data_dir` from the config file (if non-empty)
    /// 3. Platform data directory + `musicbucket`
    /// 4. `.data/` under the working directory
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.is_empty() {
                return PathBuf::from(dir);
            }
        }
        if !self.data_dir.trim().is_empty() {
            return PathBuf::from(self.data_dir.trim());
        }
        dirs::data_dir()
            .map(|d| d.join("musicbucket"))
            .unwrap_or_else(|| PathBuf::from(".data"))
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        if let Some(max) = self.max_history_snapshots.as_mut() {
            *max = (*max).max(MIN_HISTORY_SNAPSHOTS);
        }

        for preset in &mut self.default_tiers {
            preset.label = preset.label.trim().to_string();
        }
        self.default_tiers.retain(|p| !p.label.is_empty());

        // Labels double as tier ids on new boards, so keep the first of each.
        let mut seen = Vec::with_capacity(self.default_tiers.len());
        self.default_tiers.retain(|p| {
            if seen.contains(&p.label) {
                false
            } else {
                seen.push(p.label.clone());
                true
            }
        });

        if self.default_tiers.is_empty() {
            self.default_tiers = default_presets();
        }
    }
}
