//! Walking simulation
//!
//! Player movement and layer recycling. No rendering or platform
//! dependencies; the only randomness is the scene's seeded RNG.

pub mod state;
pub mod tick;

pub use state::{Disc, Layer, LayerKind, PlayerState, Scene, default_layers};
pub use tick::{TickInput, accelerate, recycle_layers, recycled_depth, tick};
