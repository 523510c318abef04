//! Parallax Walk - a one-dimensional walking scene with depth-projected layers
//!
//! Core modules:
//! - `sim`: Player movement, layer templates and depth recycling
//! - `renderer`: Depth projection, draw ordering and the `Surface` boundary
//! - `assets`: Fixed asset manifest and the loading gate
//! - `platform`: Keyboard mapping and browser glue
//! - `tuning`: Data-driven movement feel

pub mod assets;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use assets::{AssetId, AssetStatus, AssetTable};
pub use error::{AssetError, TuningError};
pub use settings::Settings;
pub use tuning::Tuning;

/// Scene configuration constants
pub mod consts {
    /// Player start position (just short of the first tree layer).
    /// World depths are f64 so per-frame steps survive long walks.
    pub const START_POSITION: f64 = 70.0;
    /// Top walking speed in depth units per frame
    pub const MAX_SPEED: f32 = 0.36;
    /// Velocity gained per frame while a button is held
    pub const ACCELERATION: f32 = 0.009;
    /// Per-frame velocity multiplier with no input
    pub const FRICTION: f32 = 0.9;
    /// Velocities below this snap to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;
    /// Multiplicative gait noise (±5%)
    pub const GAIT_NOISE: f32 = 0.05;

    /// Walk cycle phase advance per unit of speed
    pub const WALK_CYCLE_RATE: f32 = 0.3;
    /// Vertical bob amplitude (pixels at full speed)
    pub const BOB_AMPLITUDE: f32 = 3.5;
    /// Horizontal sway amplitude (pixels at full speed)
    pub const SWAY_AMPLITUDE: f32 = 1.5;
    /// Bob/sway decay per frame when standing still
    pub const BOB_DECAY: f32 = 0.9;

    /// Number of repeating tree layers
    pub const TREE_LAYER_COUNT: usize = 20;
    /// Depth between consecutive tree layers
    pub const LAYER_SPACING: f64 = 100.0;
    /// Length of one full repeat of the layer set
    pub const CYCLE_LENGTH: f64 = TREE_LAYER_COUNT as f64 * LAYER_SPACING;
    /// A field layer follows every tree layer whose index has this remainder mod 5
    pub const FIELD_LAYER_PHASE: usize = 2;
    /// Field layer offset past its tree layer, in spacings
    pub const FIELD_LAYER_OFFSET: f64 = 1.25;
    /// Depth of the middle-distance layer (ten hours of walking at top speed)
    pub const MIDDLE_LAYER_DEPTH: f64 = 12960.0;

    /// Perspective constant: scale = PROJECTION / depth
    pub const PROJECTION: f32 = 300.0;
    /// Base size of a tree layer before projection
    pub const TREE_BASE_SIZE: f32 = 800.0;
    /// Projected tree layers at or below this size are skipped
    pub const TREE_MIN_SIZE: f32 = 10.0;
    /// Horizon line below screen centre, as a fraction of screen height
    pub const HORIZON_OFFSET: f32 = 0.3;
    /// Fraction of a tree image that sits above the horizon
    pub const TREE_ANCHOR: f32 = 0.7;
    /// Fraction of a field image that sits above the horizon
    pub const FIELD_ANCHOR: f32 = 0.32;
    /// Middle layer scale range over the full approach
    pub const MIDDLE_MIN_SCALE: f32 = 1.0;
    pub const MIDDLE_MAX_SCALE: f32 = 3.0;
    /// Middle layer lift above the bottom edge, as a fraction of screen height
    pub const MIDDLE_LIFT: f32 = 0.05;

    /// Alpha floors per layer kind
    pub const MIDDLE_MIN_ALPHA: f32 = 0.6;
    pub const FIELD_MIN_ALPHA: f32 = 0.5;
    pub const DISC_MIN_ALPHA: f32 = 0.3;

    /// Colours
    pub const LOADING_BACKGROUND: &str = "#1a1a2e";
    pub const SKY_GRADIENT: [(f32, &str); 3] =
        [(0.0, "#87CEEB"), (0.7, "#98D8E8"), (1.0, "#B0E0E6")];
    pub const TEXT_COLOR: &str = "#FFFFFF";
    pub const PROMPT_SHADOW: &str = "rgba(0, 0, 0, 0.5)";
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
