//! User settings persisted as JSON in the platform config directory.
//!
//! Precedence: command-line flags, then `SNAKE_ARCADE_SERVER`, then the
//! settings file, then built-in defaults.

use crate::core::constants::{DEFAULT_SERVER_URL, SERVER_URL_ENV, SETTINGS_FILE_NAME};
use crate::game::{EngineConfig, Variant};
use crate::utils::persistence::{config_dir, load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    /// Prefilled in the name prompt; updated after each successful submission.
    pub last_player_name: Option<String>,
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            last_player_name: None,
            engine: EngineConfig::default(),
        }
    }
}

/// Overrides collected from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub variant: Option<Variant>,
    pub grid_size: Option<i16>,
}

impl Settings {
    pub fn default_path() -> io::Result<PathBuf> {
        Ok(config_dir()?.join(SETTINGS_FILE_NAME))
    }

    /// Load from `path`; an invalid engine section falls back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let mut settings: Settings = load_json_or_default(path);
        if let Err(reason) = settings.engine.validate() {
            tracing::warn!(%reason, "invalid engine settings, using defaults");
            settings.engine = EngineConfig::default();
        }
        settings
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    /// Apply the environment and command-line overrides, in that order.
    pub fn apply_overrides(&mut self, env_server_url: Option<String>, cli: &CliOverrides) {
        if let Some(url) = env_server_url.filter(|u| !u.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(url) = &cli.server_url {
            self.server_url = url.clone();
        }
        if let Some(variant) = cli.variant {
            self.engine.variant = variant;
        }
        if let Some(grid_size) = cli.grid_size {
            let candidate = EngineConfig {
                grid_size,
                ..self.engine.clone()
            };
            match candidate.validate() {
                Ok(()) => self.engine = candidate,
                Err(reason) => tracing::warn!(%reason, "ignoring --grid"),
            }
        }
    }

    /// Server URL from the environment, if set.
    pub fn env_server_url() -> Option<String> {
        std::env::var(SERVER_URL_ENV).ok()
    }
}
