//! Depth projection
//!
//! Maps layer depths relative to the walker to screen-space scale, placement
//! and alpha. Apparent size follows `PROJECTION / z`, the single-axis
//! perspective law.

use glam::Vec2;

use super::Rect;
use crate::consts::*;
use crate::lerp;
use crate::sim::{Disc, Layer, LayerKind};

/// A visible repeating layer, ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawItem {
    Tree { image: u8, z: f32, scale: f32 },
    Field { z: f32, scale: f32 },
    Disc { disc: Disc, z: f32, center: Vec2, radius: f32 },
}

impl DrawItem {
    /// Depth relative to the walker
    pub fn z(&self) -> f32 {
        match self {
            DrawItem::Tree { z, .. } | DrawItem::Field { z, .. } | DrawItem::Disc { z, .. } => *z,
        }
    }
}

/// Layers that have passed this far behind the walker are culled
#[inline]
pub fn is_culled(z: f32) -> bool {
    z <= -(LAYER_SPACING as f32)
}

/// Image scale at relative depth `z`, held at `PROJECTION` once the layer
/// reaches the camera
#[inline]
pub fn image_scale(z: f32) -> f32 {
    if z > 0.0 { PROJECTION / z } else { PROJECTION }
}

/// Project the repeating layers and order them farthest first.
///
/// The middle layer is not included; see `middle_placement`.
pub fn project_layers(layers: &[Layer], position: f64, screen: Vec2) -> Vec<DrawItem> {
    let center = screen * 0.5;

    let mut items: Vec<DrawItem> = layers
        .iter()
        .filter_map(|layer| {
            let z = (layer.depth - position) as f32;
            if is_culled(z) {
                return None;
            }
            match layer.kind {
                LayerKind::Tree(image) => Some(DrawItem::Tree {
                    image,
                    z,
                    scale: image_scale(z),
                }),
                LayerKind::Field => Some(DrawItem::Field {
                    z,
                    scale: image_scale(z),
                }),
                LayerKind::Disc(disc) => {
                    let scale = PROJECTION / z;
                    let radius = disc.size * scale;
                    // Also rejects the non-finite and negative radii at z <= 0
                    if !(radius > 0.5 && radius < 1000.0) {
                        return None;
                    }
                    Some(DrawItem::Disc {
                        disc,
                        z,
                        center: center + disc.offset * scale,
                        radius,
                    })
                }
                LayerKind::Middle => None,
            }
        })
        .collect();

    items.sort_by(|a, b| b.z().total_cmp(&a.z()));
    items
}

/// Horizon line in screen space
#[inline]
pub fn horizon_y(screen: Vec2) -> f32 {
    screen.y * 0.5 + screen.y * HORIZON_OFFSET
}

/// Cover-fit rectangle for the sky image
pub fn cover_rect(screen: Vec2, image: (u32, u32)) -> Rect {
    let (iw, ih) = (image.0 as f32, image.1 as f32);
    let scale = (screen.x / iw).max(screen.y / ih);
    let (w, h) = (iw * scale, ih * scale);
    Rect::new((screen.x - w) / 2.0, (screen.y - h) / 2.0, w, h)
}

/// Placement and alpha of the middle-distance layer, or None once passed
pub fn middle_placement(z: f32, screen: Vec2, aspect: f32) -> Option<(Rect, f32)> {
    if z <= 0.0 {
        return None;
    }
    let ratio = (z / MIDDLE_LAYER_DEPTH as f32).min(1.0);
    let scale = lerp(MIDDLE_MIN_SCALE, MIDDLE_MAX_SCALE, 1.0 - ratio);

    let w = screen.x * scale;
    let h = w / aspect;
    let rect = Rect::new(
        (screen.x - w) / 2.0,
        screen.y - h - screen.y * MIDDLE_LIFT,
        w,
        h,
    );
    let alpha = (1.0 - ratio * 0.3).clamp(MIDDLE_MIN_ALPHA, 1.0);
    Some((rect, alpha))
}

/// Placement of a tree layer, or None when it projects too small
pub fn tree_rect(scale: f32, screen: Vec2, aspect: f32) -> Option<Rect> {
    let size = TREE_BASE_SIZE * scale;
    if size <= TREE_MIN_SIZE {
        return None;
    }
    let h = size / aspect;
    Some(Rect::new(
        screen.x * 0.5 - size / 2.0,
        horizon_y(screen) - h * TREE_ANCHOR,
        size,
        h,
    ))
}

/// Shake attenuation for a tree layer: cubic falloff over the repeat cycle.
///
/// Only the far end is clamped. Layers that have slipped behind the walker
/// (`z < 0`) shake slightly harder than full strength.
#[inline]
pub fn shake_factor(z: f32) -> f32 {
    let d = (z / CYCLE_LENGTH as f32).min(1.0);
    (1.0 - d).powi(3)
}

/// Placement and alpha of a field layer; only drawn ahead of the walker
pub fn field_placement(z: f32, screen: Vec2, aspect: f32) -> Option<(Rect, f32)> {
    if z <= 0.0 {
        return None;
    }
    let scale = PROJECTION / z;
    let w = screen.x * (1.0 + (scale / PROJECTION) * 2.0);
    let h = w / aspect;
    let rect = Rect::new(
        screen.x * 0.5 - w / 2.0,
        horizon_y(screen) - h * FIELD_ANCHOR,
        w,
        h,
    );
    Some((rect, scale.clamp(FIELD_MIN_ALPHA, 1.0)))
}

/// Alpha for a disc at relative depth `z`
#[inline]
pub fn disc_alpha(z: f32) -> f32 {
    (PROJECTION / z).clamp(DISC_MIN_ALPHA, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: Vec2 = Vec2::new(1280.0, 720.0);

    fn trees(depths: &[f64]) -> Vec<Layer> {
        depths
            .iter()
            .map(|&d| Layer::new(d, LayerKind::Tree(0)))
            .collect()
    }

    #[test]
    fn test_draw_order_farthest_first() {
        let items = project_layers(&trees(&[50.0, 300.0, 10.0]), 0.0, SCREEN);
        let order: Vec<f32> = items.iter().map(DrawItem::z).collect();
        assert_eq!(order, vec![300.0, 50.0, 10.0]);
    }

    #[test]
    fn test_cull_boundary() {
        let items = project_layers(&trees(&[-LAYER_SPACING]), 0.0, SCREEN);
        assert!(items.is_empty());

        let items = project_layers(&trees(&[-LAYER_SPACING + 0.01]), 0.0, SCREEN);
        assert_eq!(items.len(), 1);
        // Held at full projection once behind the camera
        assert!(matches!(items[0], DrawItem::Tree { scale, .. } if scale == PROJECTION));
    }

    #[test]
    fn test_hyperbolic_scale() {
        assert_eq!(image_scale(300.0), 1.0);
        assert_eq!(image_scale(150.0), 2.0);
        assert_eq!(image_scale(0.0), PROJECTION);
    }

    #[test]
    fn test_middle_layer_is_skipped() {
        let layers = vec![Layer::new(500.0, LayerKind::Middle)];
        assert!(project_layers(&layers, 0.0, SCREEN).is_empty());
    }

    #[test]
    fn test_middle_grows_on_approach() {
        let (far, far_alpha) = middle_placement(MIDDLE_LAYER_DEPTH as f32, SCREEN, 2.0).unwrap();
        assert_eq!(far.w, SCREEN.x);
        assert!((far_alpha - 0.7).abs() < 1e-6);

        let (near, near_alpha) = middle_placement(1.0, SCREEN, 2.0).unwrap();
        assert!(near.w > SCREEN.x * 2.99);
        assert!(near_alpha > 0.99);
        // Centred horizontally
        assert!((near.x + near.w / 2.0 - SCREEN.x / 2.0).abs() < 1e-2);

        assert!(middle_placement(0.0, SCREEN, 2.0).is_none());
    }

    #[test]
    fn test_middle_alpha_floor() {
        // Beyond the start distance the ratio saturates, alpha stays above the floor
        let (_, alpha) = middle_placement(MIDDLE_LAYER_DEPTH as f32 * 4.0, SCREEN, 2.0).unwrap();
        assert!(alpha >= MIDDLE_MIN_ALPHA);
    }

    #[test]
    fn test_tree_rect_min_size() {
        assert!(tree_rect(PROJECTION / 30_000.0, SCREEN, 1.0).is_none());
        assert!(tree_rect(PROJECTION / 20_000.0, SCREEN, 1.0).is_some());
        let rect = tree_rect(1.0, SCREEN, 2.0).unwrap();
        assert_eq!(rect.w, 800.0);
        assert_eq!(rect.h, 400.0);
        assert_eq!(rect.x, 240.0);
        assert!((rect.y - (horizon_y(SCREEN) - 280.0)).abs() < 1e-3);
    }

    #[test]
    fn test_shake_falls_off_with_distance() {
        let cycle = CYCLE_LENGTH as f32;
        assert_eq!(shake_factor(0.0), 1.0);
        assert_eq!(shake_factor(cycle), 0.0);
        assert_eq!(shake_factor(cycle * 3.0), 0.0);
        assert!((shake_factor(cycle / 2.0) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_shake_grows_behind_walker() {
        // Just inside the cull margin: (1 + 95/2000)^3
        let behind = shake_factor(-95.0);
        assert!(behind > 1.0);
        assert!((behind - 1.149_38).abs() < 1e-3);
        assert!(shake_factor(-50.0) < behind);
        assert!(shake_factor(-50.0) > shake_factor(0.0));
    }

    #[test]
    fn test_field_width_and_alpha() {
        let (rect, alpha) = field_placement(300.0, SCREEN, 4.0).unwrap();
        // scale 1 -> width grows by 2/300 of the screen
        assert!((rect.w - SCREEN.x * (1.0 + 2.0 / 300.0)).abs() < 1e-3);
        assert_eq!(alpha, 1.0);

        let (_, far_alpha) = field_placement(3000.0, SCREEN, 4.0).unwrap();
        assert_eq!(far_alpha, FIELD_MIN_ALPHA);

        assert!(field_placement(0.0, SCREEN, 4.0).is_none());
        assert!(field_placement(-20.0, SCREEN, 4.0).is_none());
    }

    #[test]
    fn test_cover_rect_fills_screen() {
        let rect = cover_rect(SCREEN, (1000, 1000));
        assert!((rect.w - 1280.0).abs() < 1e-2);
        assert!((rect.h - 1280.0).abs() < 1e-2);
        assert!(rect.x.abs() < 1e-2);
        assert!((rect.y + 280.0).abs() < 1e-2);
    }

    #[test]
    fn test_disc_projection() {
        let disc = Disc {
            offset: Vec2::new(10.0, -5.0),
            size: 20.0,
            color: "red",
            number: Some(3),
        };
        let layers = vec![
            Layer::new(300.0, LayerKind::Disc(disc)),
            // Behind the camera: non-positive radius
            Layer::new(-10.0, LayerKind::Disc(disc)),
            // At the camera: infinite radius
            Layer::new(0.0, LayerKind::Disc(disc)),
            // Far enough to shrink below half a pixel
            Layer::new(20_000.0, LayerKind::Disc(disc)),
        ];
        let items = project_layers(&layers, 0.0, SCREEN);
        assert_eq!(items.len(), 1);
        match items[0] {
            DrawItem::Disc { center, radius, .. } => {
                assert_eq!(radius, 20.0);
                assert_eq!(center, Vec2::new(650.0, 355.0));
            }
            _ => panic!("expected disc"),
        }
        assert_eq!(disc_alpha(300.0), 1.0);
        assert_eq!(disc_alpha(3000.0), DISC_MIN_ALPHA);
    }

    proptest! {
        #[test]
        fn prop_sorted_and_culled(
            depths in proptest::collection::vec(-500.0f64..5000.0, 0..40),
            position in -200.0f64..200.0,
        ) {
            let items = project_layers(&trees(&depths), position, SCREEN);
            for pair in items.windows(2) {
                prop_assert!(pair[0].z() >= pair[1].z());
            }
            for item in &items {
                prop_assert!(item.z() > -(LAYER_SPACING as f32));
            }
            let expected = depths.iter().filter(|&&d| !is_culled((d - position) as f32)).count();
            prop_assert_eq!(items.len(), expected);
        }
    }
}
