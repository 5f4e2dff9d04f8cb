use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest grid side accepted by [`GameConfig::validate`]
pub const MAX_GRID_SIDE: usize = 200;

/// Pacing presets for the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 200ms per manual tick
    Easy,
    /// 100ms per manual tick
    #[default]
    Medium,
    /// 50ms per manual tick
    Hard,
}

impl Difficulty {
    /// Delay between ticks when a person is steering
    pub fn manual_interval(&self) -> Duration {
        match self {
            Self::Easy => Duration::from_millis(200),
            Self::Medium => Duration::from_millis(100),
            Self::Hard => Duration::from_millis(50),
        }
    }

    /// Autoplay runs at half the manual pace so it can be watched
    pub fn autoplay_interval(&self) -> Duration {
        self.manual_interval() * 2
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid (columns)
    pub grid_width: usize,
    /// Height of the game grid (rows)
    pub grid_height: usize,
    /// Points awarded per food eaten
    pub food_score: u32,
    /// Tick pacing
    pub difficulty: Difficulty,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 15,
            food_score: 10,
            difficulty: Difficulty::Medium,
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

    /// Read a JSON config file; absent fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config in {:?}", path))?;
        Ok(config)
    }

    /// Largest per-food score for which a full board still fits in a `u32`
    pub fn max_food_score(&self) -> u32 {
        let cells = (self.grid_width * self.grid_height).max(1) as u64;
        (u64::from(u32::MAX) / cells) as u32
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(format!(
                "grid sides must not exceed {}, got {}x{}",
                MAX_GRID_SIDE, self.grid_width, self.grid_height
            ));
        }
        if self.food_score == 0 {
            return Err("food_score must be positive".to_string());
        }
        if self.food_score > self.max_food_score() {
            return Err(format!(
                "food_score {} could overflow the score on a {}x{} grid (max {})",
                self.food_score,
                self.grid_width,
                self.grid_height,
                self.max_food_score()
            ));
        }
        Ok(())
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
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_validation_rejects_empty_grid() {
        assert!(GameConfig::new(0, 5).validate().is_err());
        assert!(GameConfig::new(5, 0).validate().is_err());
        assert!(GameConfig::new(1, 1).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_oversized_grid() {
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 5).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_food_score() {
        let config = GameConfig {
            food_score: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bounds_food_score_by_grid() {
        let huge = GameConfig {
            food_score: 3_000_000_000,
            ..GameConfig::new(5, 5)
        };
        assert!(huge.validate().is_err());

        let largest = GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE);
        let at_limit = GameConfig {
            food_score: largest.max_food_score(),
            ..largest.clone()
        };
        assert!(at_limit.validate().is_ok());
        let cells = (MAX_GRID_SIDE * MAX_GRID_SIDE) as u64;
        assert!(u64::from(at_limit.food_score) * cells <= u64::from(u32::MAX));

        let over = GameConfig {
            food_score: largest.max_food_score() + 1,
            ..largest
        };
        assert!(over.validate().is_err());
    }

    #[test]
    fn test_difficulty_pacing() {
        assert_eq!(Difficulty::Easy.manual_interval(), Duration::from_millis(200));
        assert_eq!(Difficulty::Medium.manual_interval(), Duration::from_millis(100));
        assert_eq!(Difficulty::Hard.manual_interval(), Duration::from_millis(50));
        assert_eq!(Difficulty::Hard.autoplay_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"grid_width": 8, "difficulty": "hard"}}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_width, 8);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(GameConfig::load(file.path()).is_err());
    }
}
