//! Engine configuration.
//!
//! Everything the engine would otherwise read from process-wide feature
//! flags is carried here and injected when the engine is built.
//!
//! # Example
//!
//! ```
//! use reactv_core::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(
//!     r#"
//!     enable_key_down_events = true
//!     long_press_threshold_ms = 450
//!     "#,
//! )
//! .unwrap();
//! assert!(config.enable_key_down_events);
//! assert_eq!(config.initial_clip_capacity, 12);
//! ```

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::id::SurfaceId;

/// Default long-press threshold for remote keys, in milliseconds.
pub const DEFAULT_LONG_PRESS_THRESHOLD_MS: u64 = 300;

/// Default starting capacity of a clipping container's shadow child array.
pub const DEFAULT_CLIP_CAPACITY: usize = 12;

/// Tunables for a view engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Emit remote key events on key-down as well as key-up.
    pub enable_key_down_events: bool,
    /// How long a key must be held before it counts as a long press.
    pub long_press_threshold_ms: u64,
    /// Minimum starting capacity of a shadow child array.
    pub initial_clip_capacity: usize,
    /// How many slots a full shadow child array grows by.
    pub clip_capacity_increment: usize,
    /// Surface reported with outbound events.
    pub surface_id: SurfaceId,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_key_down_events: false,
            long_press_threshold_ms: DEFAULT_LONG_PRESS_THRESHOLD_MS,
            initial_clip_capacity: DEFAULT_CLIP_CAPACITY,
            clip_capacity_increment: DEFAULT_CLIP_CAPACITY,
            surface_id: SurfaceId::default(),
        }
    }
}

impl EngineConfig {
    /// Decode a config from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: EngineConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.clip_capacity_increment == 0 {
            return Err(ConfigError::invalid_value(
                "clip_capacity_increment",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn with_key_down_events(mut self, enabled: bool) -> Self {
        self.enable_key_down_events = enabled;
        self
    }

    pub fn with_long_press_threshold_ms(mut self, ms: u64) -> Self {
        self.long_press_threshold_ms = ms;
        self
    }

    pub fn with_clip_capacity(mut self, initial: usize, increment: usize) -> Self {
        self.initial_clip_capacity = initial;
        self.clip_capacity_increment = increment.max(1);
        self
    }

    pub fn with_surface_id(mut self, surface_id: SurfaceId) -> Self {
        self.surface_id = surface_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert!(!config.enable_key_down_events);
        assert_eq!(config.long_press_threshold_ms, 300);
        assert_eq!(config.initial_clip_capacity, 12);
        assert_eq!(config.clip_capacity_increment, 12);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = EngineConfig::from_toml_str("surface_id = 4\nclip_capacity_increment = 8").unwrap();
        assert_eq!(config.surface_id, SurfaceId(4));
        assert_eq!(config.clip_capacity_increment, 8);
        assert_eq!(config.long_press_threshold_ms, 300);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        assert!(matches!(
            EngineConfig::from_toml_str("long_press = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_increment_is_rejected() {
        let err = EngineConfig::from_toml_str("clip_capacity_increment = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "clip_capacity_increment",
                ..
            }
        ));
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::default()
            .with_key_down_events(true)
            .with_long_press_threshold_ms(500)
            .with_clip_capacity(4, 0);
        assert!(config.enable_key_down_events);
        assert_eq!(config.long_press_threshold_ms, 500);
        assert_eq!(config.initial_clip_capacity, 4);
        assert_eq!(config.clip_capacity_increment, 1);
    }
}
