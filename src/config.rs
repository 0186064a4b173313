use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GameError, Result};
use crate::scheduler::GameSettings;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub target_count: usize,
    pub max_reaction_secs: f64,
    pub round_gap_secs: f64,
    pub tick_rate_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_count: 3,
            max_reaction_secs: 1.5,
            // fade-in 0.5s + pop-out 0.25s + pause 0.2s
            round_gap_secs: 0.95,
            tick_rate_ms: 16,
            seed: None,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

impl TryFrom<&Config> for GameSettings {
    type Error = GameError;

    fn try_from(cfg: &Config) -> Result<Self> {
        if cfg.target_count == 0 {
            return Err(GameError::NoTargets);
        }
        if !cfg.max_reaction_secs.is_finite() || cfg.max_reaction_secs <= 0.0 {
            return Err(GameError::InvalidReactionWindow(cfg.max_reaction_secs));
        }
        if !cfg.round_gap_secs.is_finite() || cfg.round_gap_secs < 0.0 {
            return Err(GameError::InvalidRoundGap(cfg.round_gap_secs));
        }

        // finite values can still be too large for a Duration
        let window = Duration::try_from_secs_f64(cfg.max_reaction_secs)
            .map_err(|_| GameError::InvalidReactionWindow(cfg.max_reaction_secs))?;
        let gap = Duration::try_from_secs_f64(cfg.round_gap_secs)
            .map_err(|_| GameError::InvalidRoundGap(cfg.round_gap_secs))?;

        Ok(GameSettings::new(cfg.target_count, window).with_round_gap(gap))
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "redpick") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("redpick_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
