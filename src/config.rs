use crate::battle::phase::PhaseTiming;
use crate::errors::ConfigError;
use crate::player::DEFAULT_NO_CHARACTERS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for running matches. Every field is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub timing: PhaseTiming,
    pub roster_size: usize,
    /// Fixed step used when a match is driven to completion.
    pub tick_seconds: f32,
    pub max_ticks: u64,
    /// Custom catalog. The built-in one is used when unset.
    pub catalog: Option<PathBuf>,
    /// Where win counts are kept between runs. Not persisted when unset.
    pub leaderboard: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            timing: PhaseTiming::default(),
            roster_size: DEFAULT_NO_CHARACTERS,
            tick_seconds: 1.0 / 60.0,
            max_ticks: 1_000_000,
            catalog: None,
            leaderboard: None,
        }
    }
}

impl GameConfig {
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            ron::from_str(content).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_ron_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.roster_size == 0 {
            return Err(ConfigError::InvalidValue(
                "roster_size must be at least 1".to_string(),
            ));
        }
        if !(self.tick_seconds > 0.0) {
            return Err(ConfigError::InvalidValue(
                "tick_seconds must be positive".to_string(),
            ));
        }
        let t = &self.timing;
        for (name, value) in [
            ("round_window", t.round_window),
            ("text_scroll", t.text_scroll),
            ("text_moves_buffer", t.text_moves_buffer),
            ("phase_buffer", t.phase_buffer),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue(format!(
                    "timing.{} must not be negative",
                    name
                )));
            }
        }
        let budget = self.max_ticks as f64 * f64::from(self.tick_seconds);
        if budget <= f64::from(t.min_round_duration()) {
            return Err(ConfigError::InvalidValue(format!(
                "max_ticks of {} covers {:.2}s, less than one {:.2}s round",
                self.max_ticks,
                budget,
                t.min_round_duration()
            )));
        }
        Ok(())
    }
}
