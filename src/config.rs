use crate::error::{PlacementError, Result};
use crate::placement::{DEFAULT_MAX_CANDIDATES, Strategy};
use crate::slot::SlotCounting;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const SETTINGS_FILE: &str = "settings.json";
const APP_DIR: &str = "spotplacer";

/// Settings for a placement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacerSettings {
    /// Selection strategy.
    #[serde(default)]
    pub strategy: Strategy,
    /// How markers are counted and stripped.
    #[serde(default)]
    pub slot_counting: SlotCounting,
    /// Eligible-campaign limit for the max-revenue strategy.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

fn default_max_candidates() -> usize {
    DEFAULT_MAX_CANDIDATES
}

impl Default for PlacerSettings {
    fn default() -> Self {
        PlacerSettings {
            strategy: Strategy::default(),
            slot_counting: SlotCounting::default(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl PlacerSettings {
    /// Default settings location: `<config dir>/spotplacer/settings.json`,
    /// or the working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join(SETTINGS_FILE),
            None => PathBuf::from(SETTINGS_FILE),
        }
    }

    /// Load settings from `path`, or fall back to defaults if the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return PlacerSettings::default();
        }
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => return settings,
                Err(e) => warn!("corrupt settings file {}, using defaults: {}", path.display(), e),
            },
            Err(e) => warn!("could not read settings file {}: {}", path.display(), e),
        }
        PlacerSettings::default()
    }

    /// Persist settings as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// A zero limit would make the max-revenue strategy reject every
    /// episode with an eligible campaign.
    pub fn validate(&self) -> Result<()> {
        if self.max_candidates == 0 {
            return Err(PlacementError::Config(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
