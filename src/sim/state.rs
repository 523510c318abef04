//! Scene state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::assets::{AssetTable, NEAR_IMAGE_COUNT};
use crate::consts::*;
use crate::tuning::Tuning;

/// The walker
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Depth along the walking axis (unbounded)
    pub position: f64,
    /// Depth units per frame, bounded by the (noisy) top speed
    pub velocity: f32,
    /// Walk cycle phase accumulator
    pub walk_cycle: f32,
    /// Vertical bob offset in pixels
    pub bob: f32,
    /// Horizontal sway offset in pixels
    pub sway: f32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: START_POSITION,
            velocity: 0.0,
            walk_cycle: 0.0,
            bob: 0.0,
            sway: 0.0,
        }
    }
}

impl PlayerState {
    /// Camera shake offset (sway, bob)
    pub fn shake(&self) -> Vec2 {
        Vec2::new(self.sway, self.bob)
    }
}

/// A coloured disk positioned off-axis, optionally labelled with its layer number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    /// World offset from the walking axis
    pub offset: Vec2,
    /// Radius before projection
    pub size: f32,
    pub color: &'static str,
    pub number: Option<u32>,
}

/// What a layer draws
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayerKind {
    /// Near-layer image by 0-based index
    Tree(u8),
    Field,
    Middle,
    Disc(Disc),
}

impl LayerKind {
    /// Whether the layer loops with the repeat cycle
    pub fn repeats(&self) -> bool {
        !matches!(self, LayerKind::Middle)
    }
}

/// A depth-placed layer: immutable template plus current depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub original_depth: f64,
    pub depth: f64,
    pub kind: LayerKind,
}

impl Layer {
    pub fn new(depth: f64, kind: LayerKind) -> Self {
        Self {
            original_depth: depth,
            depth,
            kind,
        }
    }
}

/// Build the fixed layer set: tree layers, interleaved field layers, the middle layer
pub fn default_layers() -> Vec<Layer> {
    let mut layers = Vec::with_capacity(TREE_LAYER_COUNT + TREE_LAYER_COUNT / 5 + 1);

    for i in 0..TREE_LAYER_COUNT {
        let base = i as f64 * LAYER_SPACING;
        let image = if i < NEAR_IMAGE_COUNT {
            i
        } else {
            (i - NEAR_IMAGE_COUNT) % NEAR_IMAGE_COUNT
        };
        layers.push(Layer::new(base, LayerKind::Tree(image as u8)));

        if i % 5 == FIELD_LAYER_PHASE {
            layers.push(Layer::new(
                base + LAYER_SPACING * FIELD_LAYER_OFFSET,
                LayerKind::Field,
            ));
        }
    }

    layers.push(Layer::new(MIDDLE_LAYER_DEPTH, LayerKind::Middle));
    layers
}

/// Application context: everything update and render need
#[derive(Debug, Clone)]
pub struct Scene {
    pub player: PlayerState,
    pub layers: Vec<Layer>,
    pub assets: AssetTable,
    pub tuning: Tuning,
    /// Frames simulated so far
    pub frame: u64,
    pub(crate) rng: Pcg32,
}

impl Scene {
    /// New scene with default layers; `seed` drives the gait noise
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self::with_layers(seed, tuning, default_layers())
    }

    pub fn with_layers(seed: u64, tuning: Tuning, layers: Vec<Layer>) -> Self {
        Self {
            player: PlayerState::default(),
            layers,
            assets: AssetTable::new(),
            tuning,
            frame: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}
