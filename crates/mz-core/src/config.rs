//! Generator configuration
//!
//! Read-only settings passed into every generation call. Loaded from JSON
//! (camelCase keys, every field optional) or built with `Default`.
//!
//! ```json
//! { "collectibles": { "maxCount": 8, "minDistance": 4 },
//!   "world": { "cellSize": 2.0 },
//!   "generation": { "roomRatio": 0.7 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or checking a configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    IoError(String),

    #[error("could not parse config: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Collectible placement limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectibleConfig {
    /// Hard cap on collectibles per level
    pub max_count: usize,
    /// Minimum Manhattan distance between two collectibles
    pub min_distance: usize,
}

impl Default for CollectibleConfig {
    fn default() -> Self {
        Self {
            max_count: 8,
            min_distance: 4,
        }
    }
}

/// World-space mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorldConfig {
    /// Side of one grid cell in world units
    pub cell_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { cell_size: 2.0 }
    }
}

/// Layout tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Room size relative to its partition, per axis
    pub room_ratio: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { room_ratio: 0.7 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub collectibles: CollectibleConfig,
    pub world: WorldConfig,
    pub generation: GenerationConfig,
}

impl GeneratorConfig {
    /// Load and validate a JSON config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::parse_config(&contents)
    }

    /// Parse and validate a JSON config string
    pub fn parse_config(contents: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the generator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cell = self.world.cell_size;
        if !cell.is_finite() || cell <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world.cellSize must be positive, got {}",
                cell
            )));
        }
        let ratio = self.generation.room_ratio;
        if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
            return Err(ConfigError::Invalid(format!(
                "generation.roomRatio must be in (0, 1], got {}",
                ratio
            )));
        }
        Ok(())
    }

    /// Pretty JSON form, suitable for writing back to a file
    pub fn to_config_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.collectibles.max_count, 8);
        assert_eq!(config.collectibles.min_distance, 4);
        assert_eq!(config.world.cell_size, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial() {
        let config =
            GeneratorConfig::parse_config(r#"{ "collectibles": { "maxCount": 5 } }"#).unwrap();
        assert_eq!(config.collectibles.max_count, 5);
        assert_eq!(config.collectibles.min_distance, 4);
        assert_eq!(config.generation.room_ratio, 0.7);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            GeneratorConfig::parse_config("{ not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            GeneratorConfig::parse_config(r#"{ "world": { "cellSize": 0 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GeneratorConfig::parse_config(r#"{ "generation": { "roomRatio": 1.5 } }"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = GeneratorConfig::load_from_file(Path::new("/nonexistent/mazegen.json"));
        assert!(matches!(err, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = GeneratorConfig::default();
        config.world.cell_size = 3.5;
        let text = config.to_config_string();
        assert!(text.contains("cellSize"));
        assert_eq!(GeneratorConfig::parse_config(&text).unwrap(), config);
    }
}
