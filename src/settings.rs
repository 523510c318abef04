//! Viewer settings and preferences
//!
//! Persisted in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::platform::input::KeyBindings;

/// Viewer settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Reduced motion (disables walking bob/sway on tree layers)
    pub reduced_motion: bool,
    /// Show the "press w to walk home." prompt
    pub show_prompt: bool,
    /// Keys for the advance/retreat buttons
    pub keys: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_prompt: true,
            keys: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Whether tree layers shake with the walking bob
    pub fn effective_shake(&self) -> bool {
        !self.reduced_motion
    }

    /// Prompt text, naming the advance key
    pub fn prompt_text(&self) -> String {
        format!("press {} to walk home.", self.keys.advance)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "parallax_walk_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
