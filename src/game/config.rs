use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::audio::SoundMode;

/// Configuration for the game
///
/// All playfield dimensions are in the same units as snake coordinates, so a
/// 640x480 field with a cell size of 20 is a 32x24 grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield
    pub screen_width: usize,
    /// Height of the playfield
    pub screen_height: usize,
    /// Size of one grid cell; every position is a multiple of it
    pub cell_size: usize,
    /// Number of segments the snake starts with
    pub initial_snake_length: usize,

    /// Milliseconds between game ticks
    pub tick_ms: u64,
    /// How long the final frame stays up after the game ends
    pub game_over_delay_ms: u64,
    /// How long the start screen is shown (0 skips it)
    pub start_screen_ms: u64,

    /// Random draws before food placement falls back to the free-cell list
    pub food_placement_attempts: usize,
    /// Which sound effects to play
    pub sound: SoundMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            cell_size: 20,
            initial_snake_length: 1,
            tick_ms: 100,
            game_over_delay_ms: 2000,
            start_screen_ms: 2500,
            food_placement_attempts: 64,
            sound: SoundMode::Off,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom playfield size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// A 10x10 grid for tests
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    pub fn with_cell_size(mut self, cell_size: usize) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Grid width in cells
    pub fn columns(&self) -> usize {
        self.screen_width / self.cell_size
    }

    /// Grid height in cells
    pub fn rows(&self) -> usize {
        self.screen_height / self.cell_size
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Reject configurations the grid model cannot represent
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell_size must be positive");
        ensure!(
            self.screen_width >= self.cell_size && self.screen_width % self.cell_size == 0,
            "screen_width {} must be a positive multiple of cell_size {}",
            self.screen_width,
            self.cell_size
        );
        ensure!(
            self.screen_height >= self.cell_size && self.screen_height % self.cell_size == 0,
            "screen_height {} must be a positive multiple of cell_size {}",
            self.screen_height,
            self.cell_size
        );
        // Positions are i32 playfield coordinates
        ensure!(
            i32::try_from(self.screen_width).is_ok() && i32::try_from(self.screen_height).is_ok(),
            "playfield {}x{} exceeds the coordinate range",
            self.screen_width,
            self.screen_height
        );
        ensure!(self.tick_ms > 0, "tick_ms must be positive");
        ensure!(
            self.initial_snake_length >= 1,
            "initial_snake_length must be at least 1"
        );
        // The starting body trails left from the center column
        ensure!(
            self.initial_snake_length <= self.columns() / 2 + 1,
            "initial_snake_length {} does not fit a grid {} cells wide",
            self.initial_snake_length,
            self.columns()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.screen_width, 640);
        assert_eq!(config.screen_height, 480);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.initial_snake_length, 1);
        assert_eq!(config.columns(), 32);
        assert_eq!(config.rows(), 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_rejects_playfield_beyond_i32() {
        assert!(GameConfig::new(4_000_000_000, 480).validate().is_err());
        assert!(GameConfig::new(640, 21_474_837_120).validate().is_err());

        let widest = i32::MAX as usize / 20 * 20;
        assert!(GameConfig::new(widest, 480).validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 150).with_cell_size(10);
        assert_eq!(config.columns(), 30);
        assert_eq!(config.rows(), 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_misaligned_playfield() {
        assert!(GameConfig::new(650, 480).validate().is_err());
        assert!(GameConfig::new(640, 0).validate().is_err());
        assert!(GameConfig::default().with_cell_size(0).validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_snake() {
        let config = GameConfig {
            initial_snake_length: 7,
            ..GameConfig::small()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            initial_snake_length: 6,
            ..GameConfig::small()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 10, "sound": "bell" }}"#).unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.sound, SoundMode::Bell);
        assert_eq!(config.screen_width, 640);
        assert_eq!(config.tick_ms, 100);
    }

    #[test]
    fn test_bad_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::from_json_file(file.path()).is_err());
    }
}
