//! Configuration handling for the intake form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CHECKBOX_COLUMNS: usize = 2;
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// User configuration for the intake form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct IntakeConfig {
    /// Recompute errors on every edit once the form has been submitted
    pub revalidate_on_change: Option<bool>,
    /// Columns in the organ checkbox grid
    pub checkbox_columns: Option<usize>,
    /// Event poll interval in milliseconds
    pub poll_interval_ms: Option<u64>,
}

impl IntakeConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "organ-intake", "organ-intake")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file, defaulting when it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: IntakeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            Self::default()
        })
    }

    pub fn revalidate_on_change(&self) -> bool {
        self.revalidate_on_change.unwrap_or(false)
    }

    pub fn checkbox_columns(&self) -> usize {
        self.checkbox_columns
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_CHECKBOX_COLUMNS)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS))
    }
}
