//! Detection configuration
//!
//! Settings consumed by the engine on every frame. Changing the mode or the
//! sensitivity takes effect on the very next frame.

use crate::error::EngineError;
use crate::types::{HabitMode, Millis};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default minimum spacing between alerts
pub const DEFAULT_ALERT_INTERVAL_MS: Millis = 3_000;

/// Default sustained-contact time before the first alert
pub const DEFAULT_DEBOUNCE_DELAY_MS: Millis = 1_000;

/// Default sensitivity (threshold 0.07 / radius 13px)
pub const DEFAULT_SENSITIVITY: f64 = 0.5;

/// Alert interval choices offered to users
pub const ALERT_INTERVAL_CHOICES_MS: [Millis; 4] = [1_000, 3_000, 5_000, 10_000];

/// Quick pause durations offered to users (5, 15 and 30 minutes)
pub const QUICK_PAUSE_PRESETS_MS: [Millis; 3] = [5 * 60_000, 15 * 60_000, 30 * 60_000];

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Habit being watched
    pub habit_mode: HabitMode,
    /// Contact sensitivity in [0, 1]; higher triggers more easily
    pub sensitivity: f64,
    /// Whether alerts fire at all
    pub is_alert_enabled: bool,
    /// Minimum spacing between any two alerts
    pub alert_interval_ms: Millis,
    /// Sustained contact required before the first alert of an episode
    pub debounce_delay_ms: Millis,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            habit_mode: HabitMode::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            is_alert_enabled: true,
            alert_interval_ms: DEFAULT_ALERT_INTERVAL_MS,
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
        }
    }
}

impl DetectionConfig {
    /// Config for a given mode with default timings
    pub fn for_mode(habit_mode: HabitMode) -> Self {
        Self {
            habit_mode,
            ..Default::default()
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.sensitivity.is_finite() || !(0.0..=1.0).contains(&self.sensitivity) {
            return Err(EngineError::InvalidConfig(format!(
                "sensitivity must be within [0, 1], got {}",
                self.sensitivity
            )));
        }
        Ok(())
    }

    /// Apply a partial update, validating the result
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<(), EngineError> {
        let mut next = self.clone();
        if let Some(mode) = update.habit_mode {
            next.habit_mode = mode;
        }
        if let Some(sensitivity) = update.sensitivity {
            next.sensitivity = sensitivity;
        }
        if let Some(enabled) = update.is_alert_enabled {
            next.is_alert_enabled = enabled;
        }
        if let Some(interval) = update.alert_interval_ms {
            next.alert_interval_ms = interval;
        }
        if let Some(delay) = update.debounce_delay_ms {
            next.debounce_delay_ms = delay;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Load config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize config to JSON
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load config from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Write config to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// A partial settings change; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habit_mode: Option<HabitMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_alert_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_interval_ms: Option<Millis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_delay_ms: Option<Millis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = DetectionConfig::default();
        assert_eq!(config.habit_mode, HabitMode::Trichotillomania);
        assert_eq!(config.sensitivity, 0.5);
        assert!(config.is_alert_enabled);
        assert_eq!(config.alert_interval_ms, 3_000);
        assert_eq!(config.debounce_delay_ms, 1_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            DetectionConfig::from_json(r#"{"habit_mode": "nose_picking", "sensitivity": 0.8}"#)
                .unwrap();
        assert_eq!(
            config,
            DetectionConfig {
                habit_mode: HabitMode::NosePicking,
                sensitivity: 0.8,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_rejects_out_of_range_sensitivity() {
        let err = DetectionConfig::from_json(r#"{"sensitivity": 1.5}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        assert!(DetectionConfig::from_json(r#"{"habit_mode": "thumb_sucking"}"#).is_err());
    }

    #[test]
    fn test_apply_update_is_atomic() {
        let mut config = DetectionConfig::default();
        let bad = ConfigUpdate {
            habit_mode: Some(HabitMode::EyeScratching),
            sensitivity: Some(-0.1),
            ..Default::default()
        };
        assert!(config.apply(&bad).is_err());
        assert_eq!(config, DetectionConfig::default());

        let good = ConfigUpdate {
            habit_mode: Some(HabitMode::EyeScratching),
            is_alert_enabled: Some(false),
            ..Default::default()
        };
        config.apply(&good).unwrap();
        assert_eq!(config.habit_mode, HabitMode::EyeScratching);
        assert!(!config.is_alert_enabled);
        assert_eq!(config.sensitivity, 0.5);
    }

    #[test]
    fn test_json_round_trip() {
        let config = DetectionConfig::for_mode(HabitMode::BeardPulling);
        let restored = DetectionConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);
    }
}
