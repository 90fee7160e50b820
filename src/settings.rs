//! Game settings and preferences
//!
//! Persisted as a flat JSON record through the `persistence::Storage` seam.
//! Every value is clamped into its range on the way in; missing or malformed
//! fields fall back to their defaults one at a time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::persistence::{Storage, StorageError};

/// Inclusive range a numeric setting is clamped into
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

pub const VOLUME_RANGE: Range = Range::new(0.0, 1.0);
pub const VEHICLE_COUNT_SCALE_RANGE: Range = Range::new(0.6, 1.4);
pub const SPEED_SCALE_RANGE: Range = Range::new(0.6, 1.6);
pub const REVERSE_CHANCE_RANGE: Range = Range::new(0.0, 0.2);
pub const LENGTH_MIN_RANGE: Range = Range::new(0.5, 1.0);
pub const LENGTH_MAX_RANGE: Range = Range::new(1.0, 1.6);

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Traffic ambience volume (0.0 - 1.0)
    pub ambience_volume: f32,

    // === Traffic ===
    /// Multiplier on vehicles per lane (0.6 - 1.4)
    pub vehicle_count_scale: f32,
    /// Multiplier on lane speeds (0.6 - 1.6)
    pub speed_scale: f32,
    /// Per-check chance that a vehicle turns around (0.0 - 0.2)
    pub reverse_chance: f32,
    /// Shortest vehicle as a multiple of the base width (0.5 - 1.0)
    pub length_min: f32,
    /// Longest vehicle as a multiple of the base width (1.0 - 1.6)
    pub length_max: f32,

    // === Debug ===
    /// Show the audio debug overlay
    pub debug_audio: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.8,
            ambience_volume: 0.5,

            vehicle_count_scale: 1.0,
            speed_scale: 1.0,
            reverse_chance: 0.12,
            length_min: 0.7,
            length_max: 1.3,

            debug_audio: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "crossRoadSettings";

    /// Clamp every field into range; `length_max` never drops below `length_min`
    pub fn normalized(&self) -> Self {
        let defaults = Self::default();
        let finite = |value: f32, fallback: f32| if value.is_finite() { value } else { fallback };

        let length_min = LENGTH_MIN_RANGE.clamp(finite(self.length_min, defaults.length_min));
        let length_max = LENGTH_MAX_RANGE
            .clamp(finite(self.length_max, defaults.length_max))
            .max(length_min);

        Self {
            master_volume: VOLUME_RANGE.clamp(finite(self.master_volume, defaults.master_volume)),
            sfx_volume: VOLUME_RANGE.clamp(finite(self.sfx_volume, defaults.sfx_volume)),
            ambience_volume: VOLUME_RANGE
                .clamp(finite(self.ambience_volume, defaults.ambience_volume)),
            vehicle_count_scale: VEHICLE_COUNT_SCALE_RANGE
                .clamp(finite(self.vehicle_count_scale, defaults.vehicle_count_scale)),
            speed_scale: SPEED_SCALE_RANGE.clamp(finite(self.speed_scale, defaults.speed_scale)),
            reverse_chance: REVERSE_CHANCE_RANGE
                .clamp(finite(self.reverse_chance, defaults.reverse_chance)),
            length_min,
            length_max,
            debug_audio: self.debug_audio,
        }
    }

    /// Whether switching from `self` to `other` changes how levels are built
    pub fn affects_level(&self, other: &Settings) -> bool {
        self.vehicle_count_scale != other.vehicle_count_scale
            || self.speed_scale != other.speed_scale
            || self.reverse_chance != other.reverse_chance
            || self.length_min != other.length_min
            || self.length_max != other.length_max
    }

    /// Parse a JSON record, falling back to defaults field by field
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(_) => {
                log::warn!("Settings record is not an object, using defaults");
                Self::default()
            }
            Err(err) => {
                log::warn!("Settings record is not valid JSON ({}), using defaults", err);
                Self::default()
            }
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, fallback: f32| {
            map.get(key)
                .and_then(Value::as_f64)
                // Saturate in f64; a plain cast turns 1e300 into inf
                .map(|v| v.clamp(f32::MIN as f64, f32::MAX as f64) as f32)
                .unwrap_or(fallback)
        };
        let flag = |key: &str, fallback: bool| match map.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Null) => false,
            Some(Value::Array(_) | Value::Object(_)) => true,
            None => fallback,
        };

        Self {
            master_volume: number("masterVolume", defaults.master_volume),
            sfx_volume: number("sfxVolume", defaults.sfx_volume),
            ambience_volume: number("ambienceVolume", defaults.ambience_volume),
            vehicle_count_scale: number("vehicleCountScale", defaults.vehicle_count_scale),
            speed_scale: number("speedScale", defaults.speed_scale),
            reverse_chance: number("reverseChance", defaults.reverse_chance),
            length_min: number("lengthMin", defaults.length_min),
            length_max: number("lengthMax", defaults.length_max),
            debug_audio: flag("debugAudio", defaults.debug_audio),
        }
        .normalized()
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.normalized())?)
    }

    /// Load settings from storage; absent or broken records give defaults
    pub fn load(storage: &impl Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded settings from storage");
                Self::from_json_str(&json)
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save the normalized settings to storage
    pub fn save(&self, storage: &mut impl Storage) -> Result<(), StorageError> {
        storage.set_item(Self::STORAGE_KEY, &self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
