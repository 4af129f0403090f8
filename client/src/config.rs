use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context};
use libautomata::rule::RuleKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub board_width: usize,
    pub board_height: usize,
    pub rule: RuleKind,

    /// Delay between generations while running.
    pub tick_interval_ms: u64,

    /// Chance of a cell being non-background after randomizing.
    pub random_density: f64,

    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    pub target_fps: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: 80,
            board_height: 60,
            rule: RuleKind::default(),
            tick_interval_ms: 100,
            random_density: 0.5,
            window: WindowConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "automata".to_owned(),
            width: 800,
            height: 600,
            target_fps: 60,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config: Config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.board_width > 0 && self.board_height > 0,
            "Board size must be non-zero, got {}x{}",
            self.board_width,
            self.board_height
        );
        ensure!(
            (0.0..=1.0).contains(&self.random_density),
            "random_density must be within 0..=1, got {}",
            self.random_density
        );
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be non-zero");
        ensure!(self.window.target_fps > 0, "target_fps must be non-zero");
        ensure!(
            self.window.width > 0 && self.window.height > 0,
            "Window size must be non-zero"
        );

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "rule": "brians-brain", "window": { "target_fps": 30 } }"#)
                .unwrap();

        assert_eq!(config.rule, RuleKind::BriansBrain);
        assert_eq!(config.board_width, 80);
        assert_eq!(config.window.target_fps, 30);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_rule_is_rejected() {
        let result = serde_json::from_str::<Config>(r#"{ "rule": "highlife" }"#);

        assert!(result.is_err());
    }

    #[test]
    fn validation() {
        let zero_board = Config {
            board_height: 0,
            ..Config::default()
        };
        assert!(zero_board.validate().is_err());

        let dense = Config {
            random_density: 1.2,
            ..Config::default()
        };
        assert!(dense.validate().is_err());

        let busy = Config {
            tick_interval_ms: 0,
            ..Config::default()
        };
        assert!(busy.validate().is_err());

        let mut frozen = Config::default();
        frozen.window.target_fps = 0;
        assert!(frozen.validate().is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let error = Config::load("/nonexistent/automata.json").unwrap_err();

        assert_eq!(error.to_string(), "Couldn't read config");
    }
}
