use crate::constants::{COLLECTION_KEY, CONFIG_FILE, FRAME_INTERVAL_MS, THROTTLE_MS};
use crate::error::{Error, Result};
use crate::types::{FaceRules, RareThreshold, RarityVariant};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Game settings. Every field has a default so a missing or partial config file still works.

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub rarity_variant: RarityVariant,
    pub rare_threshold: RareThreshold,
    pub throttle_ms: u64,
    pub frame_interval_ms: u64,
    pub storage_key: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rarity_variant: RarityVariant::default(),
            rare_threshold: RareThreshold::default(),
            throttle_ms: THROTTLE_MS,
            frame_interval_ms: FRAME_INTERVAL_MS,
            storage_key: COLLECTION_KEY.to_string(),
        }
    }
}

impl GameConfig {
    pub fn rules(&self) -> FaceRules {
        FaceRules {
            variant: self.rarity_variant,
            threshold: self.rare_threshold,
        }
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Reads a config file. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<GameConfig> {
        match fs::read(path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(GameConfig::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Loads from `path` if given, else from the platform config directory.
    pub fn discover(path: Option<&Path>) -> Result<GameConfig> {
        match path {
            Some(path) => GameConfig::load(path),
            None => match default_config_path() {
                Some(path) => GameConfig::load(&path),
                None => Ok(GameConfig::default()),
            },
        }
    }
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "qr-faces", "qr-faces")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
