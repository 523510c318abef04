//! Platform abstraction layer
//!
//! - `input`: keyboard events mapped to the advance/retreat buttons
//! - `web`: canvas surface, image loading and DOM glue (wasm32 only)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod web;
