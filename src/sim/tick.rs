//! Per-frame simulation step
//!
//! Advances the walker and repositions the repeating layers around it.
//! Motion is per frame: velocity is added to position once per call.

use rand::Rng;

use super::state::{Layer, PlayerState, Scene};
use crate::consts::*;
use crate::tuning::Tuning;

/// Held buttons for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Walk forward
    pub advance: bool,
    /// Walk backward
    pub retreat: bool,
}

/// Advance the scene by one frame
pub fn tick(scene: &mut Scene, input: &TickInput) {
    let noise = (scene.rng.random::<f32>(), scene.rng.random::<f32>());
    accelerate(&mut scene.player, input, &scene.tuning, noise);

    scene.player.position += scene.player.velocity as f64;
    walk_bob(&mut scene.player, &scene.tuning);
    recycle_layers(&mut scene.layers, scene.player.position);

    scene.frame += 1;
}

/// Update velocity from input. `noise` is a pair of uniform samples in [0, 1)
/// that perturb acceleration and top speed respectively.
pub fn accelerate(player: &mut PlayerState, input: &TickInput, tuning: &Tuning, noise: (f32, f32)) {
    let spread = tuning.gait_noise * 2.0;
    let accel = tuning.acceleration * (1.0 + (noise.0 - 0.5) * spread);
    let top = tuning.max_speed * (1.0 - tuning.gait_noise + noise.1 * spread);

    if input.advance {
        player.velocity = (player.velocity + accel).min(top);
    } else if input.retreat {
        player.velocity = (player.velocity - accel).max(-top);
    } else {
        player.velocity *= tuning.friction;
        if player.velocity.abs() < VELOCITY_EPSILON {
            player.velocity = 0.0;
        }
    }
}

/// Walking bob/sway, scaled by the fraction of top speed
fn walk_bob(player: &mut PlayerState, tuning: &Tuning) {
    let speed = player.velocity.abs();
    if speed > VELOCITY_EPSILON {
        player.walk_cycle += speed * WALK_CYCLE_RATE;
        let ratio = speed / tuning.max_speed;
        player.bob = player.walk_cycle.sin() * tuning.bob_amplitude * ratio;
        player.sway = (player.walk_cycle * 0.5).sin() * tuning.sway_amplitude * ratio;
    } else {
        player.bob *= BOB_DECAY;
        player.sway *= BOB_DECAY;
    }
}

/// Current depth of a repeating layer for the given player position.
///
/// Always >= `position - LAYER_SPACING` for non-negative template depths.
#[inline]
pub fn recycled_depth(original_depth: f64, position: f64) -> f64 {
    let cycles = (position / CYCLE_LENGTH).floor();
    let depth = original_depth + cycles * CYCLE_LENGTH;
    if depth < position - LAYER_SPACING {
        depth + CYCLE_LENGTH
    } else {
        depth
    }
}

/// Reposition every repeating layer around `position`
pub fn recycle_layers(layers: &mut [Layer], position: f64) {
    for layer in layers.iter_mut().filter(|l| l.kind.repeats()) {
        layer.depth = recycled_depth(layer.original_depth, position);
    }
}
