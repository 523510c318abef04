//! Movement feel tuning
//!
//! Defaults match `consts`. A JSON override (e.g. from LocalStorage) may
//! replace any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Top walking speed (depth units per frame)
    pub max_speed: f32,
    /// Velocity gained per frame while a button is held
    pub acceleration: f32,
    /// Per-frame velocity multiplier with no input (0-1)
    pub friction: f32,
    /// Multiplicative noise applied to acceleration and top speed (0-1)
    pub gait_noise: f32,
    /// Vertical bob amplitude in pixels
    pub bob_amplitude: f32,
    /// Horizontal sway amplitude in pixels
    pub sway_amplitude: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            friction: FRICTION,
            gait_noise: GAIT_NOISE,
            bob_amplitude: BOB_AMPLITUDE,
            sway_amplitude: SWAY_AMPLITUDE,
        }
    }
}

impl Tuning {
    /// LocalStorage key for overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "parallax_walk_tuning";

    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return Err(TuningError::invalid("max_speed must be positive"));
        }
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return Err(TuningError::invalid("acceleration must be positive"));
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(TuningError::invalid("friction must be in [0, 1)"));
        }
        if !(0.0..1.0).contains(&self.gait_noise) {
            return Err(TuningError::invalid("gait_noise must be in [0, 1)"));
        }
        if self.bob_amplitude < 0.0 || self.sway_amplitude < 0.0 {
            return Err(TuningError::invalid("bob/sway amplitudes must be >= 0"));
        }
        Ok(())
    }

    /// Load an override from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning override from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring tuning override: {}", e),
                }
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
