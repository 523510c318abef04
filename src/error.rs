//! Error types
//!
//! Nothing here ever reaches the frame loop: asset errors are logged and
//! recorded in the asset table, tuning errors fall back to defaults.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    /// The browser reported an error event for the image
    #[error("failed to load {file}")]
    Load { file: String },

    /// DOM/canvas setup failed before any asset could be requested
    #[error("dom error: {0}")]
    Dom(String),
}

impl AssetError {
    pub fn load(file: impl Into<String>) -> Self {
        Self::Load { file: file.into() }
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        Self::Dom(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

impl TuningError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
