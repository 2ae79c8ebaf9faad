//! TOML-based application configuration.
//!
//! Holds the configured work and break durations. Only the durations
//! survive a restart -- the countdown itself is never persisted, so every
//! launch begins a fresh, paused work interval at the configured length.
//!
//! Configuration is stored at `~/.config/respite/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;
use crate::timer::TimerConfig;

/// Timer duration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSection {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default)]
    pub work_seconds: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    #[serde(default)]
    pub break_seconds: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/respite/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSection,
}

fn default_work_minutes() -> u64 {
    25
}
fn default_break_minutes() -> u64 {
    10
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            work_seconds: 0,
            break_minutes: default_break_minutes(),
            break_seconds: 0,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("config.toml"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing a default config on first run.
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
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Timer durations as the engine consumes them.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            work_secs: self
                .timer
                .work_minutes
                .saturating_mul(60)
                .saturating_add(self.timer.work_seconds),
            break_secs: self
                .timer
                .break_minutes
                .saturating_mul(60)
                .saturating_add(self.timer.break_seconds),
        }
    }

    /// Record a committed work duration so it survives restarts.
    pub fn set_work_duration(&mut self, secs: u64) {
        self.timer.work_minutes = secs / 60;
        self.timer.work_seconds = secs % 60;
    }

    /// Record a break duration.
    pub fn set_break_duration(&mut self, secs: u64) {
        self.timer.break_minutes = secs / 60;
        self.timer.break_seconds = secs % 60;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.work_minutes, 25);
        assert_eq!(parsed.timer.break_minutes, 10);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork_minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 50);
        assert_eq!(parsed.timer.work_seconds, 0);
        assert_eq!(parsed.timer.break_minutes, 10);
    }

    #[test]
    fn timer_config_flattens_to_seconds() {
        let mut cfg = Config::default();
        cfg.timer.work_minutes = 1;
        cfg.timer.work_seconds = 30;
        cfg.timer.break_minutes = 0;
        cfg.timer.break_seconds = 45;
        let tc = cfg.timer_config();
        assert_eq!(tc.work_secs, 90);
        assert_eq!(tc.break_secs, 45);
    }

    #[test]
    fn committed_durations_are_recorded() {
        // The configured durations persist across restarts; this split is
        // what lands in the TOML file.
        let mut cfg = Config::default();
        cfg.set_work_duration(1500);
        assert_eq!(cfg.timer.work_minutes, 25);
        assert_eq!(cfg.timer.work_seconds, 0);
        cfg.set_work_duration(61);
        assert_eq!(cfg.timer.work_minutes, 1);
        assert_eq!(cfg.timer.work_seconds, 1);
        cfg.set_break_duration(600);
        assert_eq!(cfg.timer.break_minutes, 10);
        assert_eq!(cfg.timer.break_seconds, 0);
    }
}
