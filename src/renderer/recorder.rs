//! Recording surface
//!
//! Captures draw calls instead of rasterizing them. Used by tests and the
//! native headless demo.

use glam::Vec2;

use super::{Rect, Surface, TextStyle};
use crate::assets::AssetId;

/// One captured call. Images carry the alpha and translation in effect.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    FillRect { rect: Rect, color: String },
    Gradient { rect: Rect, stops: Vec<(f32, String)> },
    Image { image: AssetId, dest: Rect, alpha: f32, offset: Vec2 },
    Circle { center: Vec2, radius: f32, color: String, alpha: f32 },
    Text { text: String, pos: Vec2, font: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    alpha: f32,
    offset: Vec2,
}

impl Default for State {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    state: State,
    stack: Vec<State>,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            state: State::default(),
            stack: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Forget captured calls, keep size
    pub fn clear(&mut self) {
        self.calls.clear();
        self.state = State::default();
        self.stack.clear();
    }

    /// Images blitted, in draw order
    pub fn images(&self) -> Vec<AssetId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image { image, .. } => Some(*image),
                _ => None,
            })
            .collect()
    }

    /// Text drawn, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Depth of the save/restore stack (0 when balanced)
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[(f32, &str)]) {
        self.calls.push(DrawCall::Gradient {
            rect,
            stops: stops.iter().map(|(o, c)| (*o, c.to_string())).collect(),
        });
    }

    fn draw_image(&mut self, image: AssetId, dest: Rect) {
        self.calls.push(DrawCall::Image {
            image,
            dest,
            alpha: self.state.alpha,
            offset: self.state.offset,
        });
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.state.alpha = alpha;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            color: color.to_string(),
            alpha: self.state.alpha,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            pos,
            font: style.font.clone(),
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.offset += offset;
    }
}
