//! Immediate-mode 2D rendering
//!
//! The scene is drawn through the `Surface` trait so the projection and
//! draw ordering stay host-independent. The browser implements it over a
//! canvas 2D context; `RecordingSurface` captures calls for tests and the
//! native demo.

pub mod projection;
pub mod recorder;
pub mod scene;

pub use projection::{DrawItem, project_layers};
pub use recorder::{DrawCall, RecordingSurface};
pub use scene::render;

use glam::Vec2;

use crate::assets::AssetId;

/// Axis-aligned destination rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
}

/// Drop shadow behind text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: &'static str,
    pub blur: f32,
    pub offset: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `20px monospace`
    pub font: String,
    pub color: &'static str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub shadow: Option<Shadow>,
}

impl TextStyle {
    /// Centred text with the default baseline and no shadow
    pub fn centered(font: impl Into<String>, color: &'static str) -> Self {
        Self {
            font: font.into(),
            color,
            align: TextAlign::Center,
            baseline: TextBaseline::Alphabetic,
            shadow: None,
        }
    }
}

/// A canvas-like drawing target
pub trait Surface {
    /// Current size in pixels (width, height)
    fn size(&self) -> Vec2;

    fn fill_rect(&mut self, rect: Rect, color: &str);

    /// Fill with a top-to-bottom gradient; stops are (offset 0-1, colour)
    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[(f32, &str)]);

    /// Blit a loaded image into `dest`. Unloaded images are skipped.
    fn draw_image(&mut self, image: AssetId, dest: Rect);

    fn set_alpha(&mut self, alpha: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle);

    /// Push transform and alpha state
    fn save(&mut self);

    /// Pop transform and alpha state
    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);
}
