//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Force panel settings
    pub sensor: SensorConfig,
    /// Grid → plotter mapping
    pub mapping: MappingConfig,
    /// Motion shaping
    pub motion: MotionConfig,
    /// Raster-scan variant
    #[serde(default)]
    pub raster: RasterConfig,
    /// Heatmap display
    pub display: DisplayConfig,
    /// Plotter pen settings
    pub plotter: PlotterConfig,
}

/// Force panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Grid rows of the synthetic pad (hardware reports its own)
    pub rows: usize,
    /// Grid columns of the synthetic pad
    pub cols: usize,
    /// Synthetic pad sampling interval (ms)
    pub frame_interval_ms: u64,
}

/// Grid → plotter mapping constants.
///
/// Scale factors and envelope bounds are tuned per physical rig; they are
/// configuration, not derivable values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Plotter units per grid column
    pub scale_x: f64,
    /// Plotter units per grid row
    pub scale_y: f64,
    /// Travel envelope X bound (plotter units)
    pub x_max: f64,
    /// Travel envelope Y bound (plotter units)
    pub y_max: f64,
}

/// Motion shaping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Maximum displacement per cycle (plotter units)
    pub max_step: f64,
    /// Bounded trail capacity
    pub trail_capacity: usize,
    /// Session start position
    pub start_x: f64,
    pub start_y: f64,
    /// Parking position for teardown
    pub park_x: f64,
    pub park_y: f64,
}

/// Raster-scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Cycles per base-row advance
    pub advance_every: u32,
    /// Plotter units per base row
    pub row_height: f64,
    /// Y offset per unit of force
    pub force_gain: f64,
    /// Per-cycle Y change bound
    pub dy_limit: f64,
}

/// Heatmap display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Draw the terminal heatmap
    pub enabled: bool,
    /// Force reading rendered at full brightness
    pub force_ceiling: f32,
    /// Gamma correction exponent
    pub gamma: f32,
}

/// Plotter pen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Pen-up servo height (percent)
    pub pen_up_height: u8,
    /// Pen-down servo height (percent)
    pub pen_down_height: u8,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            rows: 105,
            cols: 185,
            frame_interval_ms: 10,
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            scale_x: 1.24,
            scale_y: 1.22,
            x_max: 230.0,
            y_max: 125.0,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            max_step: 20.0,
            trail_capacity: 100,
            start_x: 75.0,
            start_y: 60.0,
            park_x: 0.0,
            park_y: 0.0,
        }
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            advance_every: 2,
            row_height: 1.0,
            force_gain: 0.02,
            dy_limit: 1.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            force_ceiling: 700.0,
            gamma: 2.0,
        }
    }
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            pen_up_height: 98,
            pen_down_height: 2,
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.sensor.rows == 0 || self.sensor.cols == 0 {
            return Err(crate::Error::Config(format!(
                "sensor grid must be non-empty, got {}x{}",
                self.sensor.rows, self.sensor.cols
            )));
        }
        if self.mapping.scale_x <= 0.0 || self.mapping.scale_y <= 0.0 {
            return Err(crate::Error::Config(format!(
                "mapping scales must be positive, got ({}, {})",
                self.mapping.scale_x, self.mapping.scale_y
            )));
        }
        if self.mapping.x_max <= 0.0 || self.mapping.y_max <= 0.0 {
            return Err(crate::Error::Config(format!(
                "travel envelope must be positive, got ({}, {})",
                self.mapping.x_max, self.mapping.y_max
            )));
        }
        if self.motion.max_step <= 0.0 {
            return Err(crate::Error::Config(format!(
                "max_step must be positive, got {}",
                self.motion.max_step
            )));
        }
        if self.motion.trail_capacity == 0 {
            return Err(crate::Error::Config(
                "trail_capacity must be > 0".to_string(),
            ));
        }
        if !self.point_in_envelope(self.motion.start_x, self.motion.start_y) {
            return Err(crate::Error::Config(format!(
                "start position ({}, {}) is outside the travel envelope",
                self.motion.start_x, self.motion.start_y
            )));
        }
        if !self.point_in_envelope(self.motion.park_x, self.motion.park_y) {
            return Err(crate::Error::Config(format!(
                "parking position ({}, {}) is outside the travel envelope",
                self.motion.park_x, self.motion.park_y
            )));
        }
        if self.raster.advance_every == 0 {
            return Err(crate::Error::Config(
                "raster advance_every must be > 0".to_string(),
            ));
        }
        if self.raster.row_height <= 0.0 || self.raster.dy_limit <= 0.0 {
            return Err(crate::Error::Config(format!(
                "raster row_height and dy_limit must be positive, got ({}, {})",
                self.raster.row_height, self.raster.dy_limit
            )));
        }
        if self.raster.force_gain < 0.0 {
            return Err(crate::Error::Config(format!(
                "raster force_gain must not be negative, got {}",
                self.raster.force_gain
            )));
        }
        if self.display.force_ceiling <= 0.0 {
            return Err(crate::Error::Config(format!(
                "force_ceiling must be positive, got {}",
                self.display.force_ceiling
            )));
        }
        if self.display.gamma <= 0.0 {
            return Err(crate::Error::Config(format!(
                "gamma must be positive, got {}",
                self.display.gamma
            )));
        }
        if self.plotter.pen_up_height > 100 || self.plotter.pen_down_height > 100 {
            return Err(crate::Error::Config(format!(
                "pen heights are percentages, got up={} down={}",
                self.plotter.pen_up_height, self.plotter.pen_down_height
            )));
        }
        if self.plotter.pen_up_height <= self.plotter.pen_down_height {
            return Err(crate::Error::Config(format!(
                "pen_up_height must exceed pen_down_height, got up={} down={}",
                self.plotter.pen_up_height, self.plotter.pen_down_height
            )));
        }
        Ok(())
    }

    fn point_in_envelope(&self, x: f64, y: f64) -> bool {
        (0.0..=self.mapping.x_max).contains(&x) && (0.0..=self.mapping.y_max).contains(&y)
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".touchtrace").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mapping.scale_x, 1.24);
        assert_eq!(config.mapping.scale_y, 1.22);
        assert_eq!(config.motion.max_step, 20.0);
        assert_eq!(config.motion.trail_capacity, 100);
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[sensor]"));
        assert!(toml.contains("[mapping]"));
        assert!(toml.contains("[motion]"));
        assert!(toml.contains("[raster]"));
        assert!(toml.contains("[display]"));
        assert!(toml.contains("[plotter]"));
    }

    #[test]
    fn test_default_path() {
        let path = Config::default_path();
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let original = Config::default();
        let toml_str = original.to_toml().unwrap();
        let deserialized: Config = toml::from_str(&toml_str).expect("Failed to deserialize");

        assert_eq!(original.sensor.rows, deserialized.sensor.rows);
        assert_eq!(original.mapping.x_max, deserialized.mapping.x_max);
        assert_eq!(original.motion.max_step, deserialized.motion.max_step);
        assert_eq!(original.display.gamma, deserialized.display.gamma);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("test_config.toml");

        let mut original = Config::default();
        original.motion.max_step = 12.5;
        original.mapping.scale_x = 1.5;
        original.display.gamma = 1.8;

        original.save(&config_path).expect("Failed to save config");
        assert!(config_path.exists());

        let loaded = Config::load(&config_path).expect("Failed to load config");
        assert_eq!(loaded.motion.max_step, 12.5);
        assert_eq!(loaded.mapping.scale_x, 1.5);
        assert_eq!(loaded.display.gamma, 1.8);
    }

    #[test]
    fn test_config_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested_path = temp_dir
            .path()
            .join("nested")
            .join("path")
            .join("config.toml");

        let config = Config::default();
        config.save(&nested_path).expect("Failed to save config");

        assert!(nested_path.exists());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let nonexistent_path = PathBuf::from("/tmp/nonexistent_touchtrace_config.toml");
        let result = Config::load(&nonexistent_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_parsing() {
        let invalid_toml = "this is not valid toml {{{}}}";
        let result: Result<Config, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_grid() {
        let mut config = Config::default();
        config.sensor.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_scale() {
        let mut config = Config::default();
        config.mapping.scale_x = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.mapping.scale_y = -1.22;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_max_step() {
        let mut config = Config::default();
        config.motion.max_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_trail_capacity() {
        let mut config = Config::default();
        config.motion.trail_capacity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_start_outside_envelope() {
        let mut config = Config::default();
        config.motion.start_x = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_park_outside_envelope() {
        let mut config = Config::default();
        config.motion.park_y = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_advance_every() {
        let mut config = Config::default();
        config.raster.advance_every = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_gamma() {
        let mut config = Config::default();
        config.display.gamma = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_positive_force_ceiling() {
        let mut config = Config::default();
        config.display.force_ceiling = -700.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_pen_heights() {
        let mut config = Config::default();
        config.plotter.pen_up_height = 120;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plotter.pen_up_height = 2;
        config.plotter.pen_down_height = 98;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("bad_config.toml");

        let mut config = Config::default();
        config.motion.trail_capacity = 0;
        let content = toml::to_string_pretty(&config).unwrap();
        std::fs::write(&config_path, content).expect("Failed to write config");

        let result = Config::load(&config_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_without_raster_section_deserializes() {
        // A config written before the raster variant existed still loads;
        // #[serde(default)] fills the section in.
        let old_config_toml = r#"
[sensor]
rows = 105
cols = 185
frame_interval_ms = 10

[mapping]
scale_x = 1.24
scale_y = 1.22
x_max = 230.0
y_max = 125.0

[motion]
max_step = 20.0
trail_capacity = 100
start_x = 75.0
start_y = 60.0
park_x = 0.0
park_y = 0.0

[display]
enabled = true
force_ceiling = 700.0
gamma = 2.0

[plotter]
pen_up_height = 98
pen_down_height = 2
"#;

        let config: Config =
            toml::from_str(old_config_toml).expect("config without [raster] should deserialize");
        assert_eq!(config.raster.advance_every, 2);
        assert_eq!(config.raster.dy_limit, 1.0);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config.motion.max_step, cloned.motion.max_step);
        assert_eq!(config.mapping.scale_x, cloned.mapping.scale_x);
    }
}
