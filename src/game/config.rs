use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Board width in cells
pub const BOARD_WIDTH: usize = 20;
/// Board height in cells
pub const BOARD_HEIGHT: usize = 20;
/// Delay between two ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid; fixed, never read from a file
    #[serde(skip, default = "board_width")]
    pub grid_width: usize,
    /// Height of the game grid; fixed, never read from a file
    #[serde(skip, default = "board_height")]
    pub grid_height: usize,
    /// Milliseconds between two ticks
    pub tick_interval_ms: u64,
    /// Seed for food placement; random when absent
    pub seed: Option<u64>,
}

fn board_width() -> usize {
    BOARD_WIDTH
}

fn board_height() -> usize {
    BOARD_HEIGHT
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: BOARD_WIDTH,
            grid_height: BOARD_HEIGHT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Same configuration with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "board must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            i32::try_from(self.grid_width).is_ok() && i32::try_from(self.grid_height).is_ok(),
            "board dimensions {}x{} are too large",
            self.grid_width,
            self.grid_height
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be non-zero");
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(3, 3).with_seed(7);
        assert_eq!(config.grid_width, 3);
        assert_eq!(config.grid_height, 3);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validate_rejects_empty_board() {
        assert!(GameConfig::new(0, 5).validate().is_err());
        assert!(GameConfig::new(5, 0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_tick() {
        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tick interval"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_interval_ms": 100, "seed": 42 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.grid_width, BOARD_WIDTH);
        assert_eq!(config.grid_height, BOARD_HEIGHT);
    }

    #[test]
    fn test_board_size_not_configurable_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "grid_width": 99, "grid_height": 3 }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, BOARD_WIDTH);
        assert_eq!(config.grid_height, BOARD_HEIGHT);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
