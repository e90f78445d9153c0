//! Session configuration.
//!
//! Loaded from a TOML file; every field has a default so a partial file (or
//! no file at all) is fine.

use crate::data::{INVENTORY_CAPACITY, SELECTION_KEYS};
use crate::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "witching-hour.toml";

/// Session parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of the whole session in seconds
    pub session_secs: u32,
    /// Number of customer slots kept filled
    pub customer_slots: usize,
    /// Inventory slots; prompts use keys 0-8, so at most 9
    pub inventory_capacity: usize,
    /// Seed for the session's random source (None = entropy)
    pub seed: Option<u64>,
    /// Remove picked-up items from their location instead of leaving a copy
    pub deplete_location_stock: bool,
    /// TOML file replacing the bundled map, items and recipe chapters
    pub assets_path: Option<PathBuf>,
    /// Where log output goes (None = `witching-hour.log` in the temp dir)
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_secs: 600,
            customer_slots: 4,
            inventory_capacity: INVENTORY_CAPACITY,
            seed: None,
            deplete_location_stock: false,
            assets_path: None,
            log_file: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a specific path.
    /// Returns defaults if the file doesn't exist or is invalid.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::resolve(path, Self::read(path))
    }

    /// Read a config file without logging; `Ok(None)` when there is no file.
    pub fn read<P: AsRef<Path>>(path: P) -> GameResult<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path).map_err(|source| GameError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&contents).map_err(|source| GameError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(config))
    }

    /// Settle the result of [`GameConfig::read`], logging how it went.
    ///
    /// Split from `read` so the caller can install a subscriber in between.
    pub fn resolve(path: &Path, read: GameResult<Option<Self>>) -> Self {
        match read {
            Ok(Some(config)) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Ok(None) => {
                info!("Config file not found, using defaults");
                Self::default()
            },
            Err(e) => {
                warn!("Failed to load config file, using defaults: {e}");
                Self::default()
            },
        }
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> GameResult<()> {
        if self.session_secs == 0 {
            return Err(GameError::InvalidConfig("session_secs must be positive".to_string()));
        }
        if self.customer_slots == 0 {
            return Err(GameError::InvalidConfig("customer_slots must be positive".to_string()));
        }
        if self.customer_slots > SELECTION_KEYS {
            return Err(GameError::InvalidConfig(
                "customer_slots must fit the 0-8 selection keys".to_string(),
            ));
        }
        if self.inventory_capacity == 0 || self.inventory_capacity > INVENTORY_CAPACITY {
            return Err(GameError::InvalidConfig(format!(
                "inventory_capacity must be between 1 and {INVENTORY_CAPACITY}"
            )));
        }
        Ok(())
    }

    /// Log file path, falling back to the temp dir.
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("witching-hour.log"))
    }
}
