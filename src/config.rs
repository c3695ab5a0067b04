use crate::point::DEFAULT_PRESSURE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a pad configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the signature pad.
///
/// Every field has a default, so a partial JSON document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct PadConfig {
    /// Backing pixels per displayed point
    pub scale_factor: f32,
    /// Samples closer than this to the last accepted point are dropped
    pub min_point_distance: f32,
    /// Pressure used when the device reports none
    pub default_pressure: f32,
    /// Brush size as a fraction of the smaller surface dimension
    pub brush_fraction: f32,
    pub thinning: f32,
    pub streamline: f32,
    pub smoothing: f32,
    /// Length of the end taper, in device pixels
    pub taper_end: f32,
    /// Ink color as unmultiplied RGBA
    pub ink_color: [u8; 4],
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            min_point_distance: 5.0,
            default_pressure: DEFAULT_PRESSURE,
            brush_fraction: 0.03,
            thinning: 0.6,
            streamline: 0.5,
            smoothing: 0.5,
            taper_end: 100.0,
            ink_color: [0, 0, 0, 255],
        }
    }
}

impl PadConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize this configuration as pretty JSON
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConfigError::InvalidValue(format!(
                "scale_factor must be positive, got {}",
                self.scale_factor
            )));
        }
        if self.min_point_distance.is_nan() || self.min_point_distance < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "min_point_distance must not be negative, got {}",
                self.min_point_distance
            )));
        }
        if !(0.0..=1.0).contains(&self.default_pressure) {
            return Err(ConfigError::InvalidValue(format!(
                "default_pressure must be within [0, 1], got {}",
                self.default_pressure
            )));
        }
        if !(self.brush_fraction > 0.0 && self.brush_fraction <= 1.0) {
            return Err(ConfigError::InvalidValue(format!(
                "brush_fraction must be within (0, 1], got {}",
                self.brush_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PadConfig::from_json_str(r#"{ "scale_factor": 3.0 }"#).unwrap();
        assert_eq!(config.scale_factor, 3.0);
        assert_eq!(config.min_point_distance, 5.0);
        assert_eq!(config.ink_color, [0, 0, 0, 255]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = PadConfig::from_json_str(r#"{ "scale_factor": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = PadConfig::from_json_str(r#"{ "default_pressure": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = PadConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PadConfig {
            ink_color: [10, 20, 30, 255],
            ..PadConfig::default()
        };
        let json = config.to_json_string().unwrap();
        assert_eq!(PadConfig::from_json_str(&json).unwrap(), config);
    }
}
