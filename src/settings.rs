//! Sketch tuning
//!
//! Injected into the sketch at construction so tests can run with
//! alternate values. Persisted as JSON next to the picture file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::StorageError;

/// Immutable tuning record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Drawable disk radius (pixels)
    pub screen_radius: f32,
    pub background_colour: Vec3,
    pub line_colour: Vec3,
    pub pointer_colour: Vec3,
    pub lifted_pointer_colour: Vec3,

    // === Pen motion ===
    pub min_speed: f32,
    pub max_speed: f32,
    /// Speed gained per frame while a direction is held
    pub acceleration: f32,

    // === Shake to clear ===
    pub shakes_to_clear: u32,

    // === Tilt compensation ===
    /// Smoothing divisor (1 = no smoothing)
    pub tilt_damping: f32,
    /// z reading above which the device is treated as lying flat
    pub flat_threshold: f32,

    // === HUD ===
    pub hint_message: String,
    pub notification_seconds: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_radius: SCREEN_RADIUS,
            background_colour: BACKGROUND_COLOUR,
            line_colour: LINE_COLOUR,
            pointer_colour: POINTER_COLOUR,
            lifted_pointer_colour: LIFTED_POINTER_COLOUR,

            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,

            shakes_to_clear: SHAKES_TO_CLEAR,

            tilt_damping: TILT_DAMPING,
            flat_threshold: FLAT_THRESHOLD,

            hint_message: HINT_MESSAGE.to_string(),
            notification_seconds: NOTIFICATION_SECONDS,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults if absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let settings: Self = serde_json::from_str(&json).map_err(|source| StorageError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings.validated())
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| StorageError::Settings {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|e| StorageError::io(path, e))?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Repair values the sketch cannot run with
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.screen_radius > 0.0) {
            log::warn!("screen_radius {} is not positive, using default", self.screen_radius);
            self.screen_radius = defaults.screen_radius;
        }
        if !(self.min_speed >= 0.0) {
            log::warn!("min_speed {} is negative, using default", self.min_speed);
            self.min_speed = defaults.min_speed;
        }
        if !(self.max_speed >= self.min_speed) {
            log::warn!(
                "max_speed {} below min_speed {}, raising it",
                self.max_speed,
                self.min_speed
            );
            self.max_speed = self.min_speed;
        }
        if !(self.acceleration >= 0.0) {
            log::warn!("acceleration {} is negative, using default", self.acceleration);
            self.acceleration = defaults.acceleration;
        }
        if self.shakes_to_clear == 0 {
            log::warn!("shakes_to_clear must be at least 1");
            self.shakes_to_clear = 1;
        }
        if !(self.tilt_damping >= 1.0) {
            log::warn!("tilt_damping {} below 1, disabling smoothing", self.tilt_damping);
            self.tilt_damping = 1.0;
        }
        if !(self.flat_threshold >= 0.0) {
            log::warn!("flat_threshold {} is negative, using default", self.flat_threshold);
            self.flat_threshold = defaults.flat_threshold;
        }
        if !(self.notification_seconds >= 0.0) {
            log::warn!(
                "notification_seconds {} is negative, using default",
                self.notification_seconds
            );
            self.notification_seconds = defaults.notification_seconds;
        }

        for colour in [
            &mut self.background_colour,
            &mut self.line_colour,
            &mut self.pointer_colour,
            &mut self.lifted_pointer_colour,
        ] {
            *colour = colour.clamp(Vec3::ZERO, Vec3::ONE);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "shakes_to_clear": 3 }"#).unwrap();
        assert_eq!(settings.shakes_to_clear, 3);
        assert_eq!(settings.screen_radius, SCREEN_RADIUS);
        assert_eq!(settings.hint_message, HINT_MESSAGE);
    }

    #[test]
    fn test_validated_repairs_bad_values() {
        let settings = Settings {
            screen_radius: -4.0,
            min_speed: 3.0,
            max_speed: 1.0,
            shakes_to_clear: 0,
            tilt_damping: 0.0,
            line_colour: Vec3::new(2.0, -1.0, 0.5),
            ..Default::default()
        }
        .validated();

        assert_eq!(settings.screen_radius, SCREEN_RADIUS);
        assert_eq!(settings.max_speed, 3.0);
        assert_eq!(settings.shakes_to_clear, 1);
        assert_eq!(settings.tilt_damping, 1.0);
        assert_eq!(settings.line_colour, Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_validated_repairs_nan_and_negative_timings() {
        let settings = Settings {
            flat_threshold: f32::NAN,
            notification_seconds: -2.0,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.flat_threshold, FLAT_THRESHOLD);
        assert_eq!(settings.notification_seconds, NOTIFICATION_SECONDS);

        let settings = Settings {
            flat_threshold: -0.5,
            notification_seconds: f32::NAN,
            ..Default::default()
        }
        .validated();
        assert_eq!(settings.flat_threshold, FLAT_THRESHOLD);
        assert_eq!(settings.notification_seconds, NOTIFICATION_SECONDS);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("etch-sketch-no-such-settings.json");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("etch-sketch-settings-{}", std::process::id()));
        let path = dir.join("nested").join("settings.json");
        let settings = Settings {
            max_speed: 8.0,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let dir = std::env::temp_dir().join(format!("etch-sketch-bad-settings-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(StorageError::Settings { .. })));
        let _ = fs::remove_dir_all(&dir);
    }
}
