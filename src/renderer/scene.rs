//! Frame rendering
//!
//! Draw order: background, middle-distance layer, repeating layers farthest
//! first, then the prompt. Missing images are skipped, never fatal.

use glam::Vec2;

use super::projection::*;
use super::{Rect, Shadow, Surface, TextBaseline, TextStyle};
use crate::assets::AssetId;
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Disc, LayerKind, Scene};

/// Draw one frame
pub fn render<S: Surface>(scene: &Scene, settings: &Settings, surface: &mut S) {
    let screen = surface.size();

    if !scene.assets.is_ready() {
        draw_loading(scene, surface, screen);
        return;
    }

    draw_background(scene, surface, screen);

    surface.save();

    draw_middle(scene, surface, screen);

    let shake = if settings.effective_shake() {
        scene.player.shake()
    } else {
        Vec2::ZERO
    };

    for item in project_layers(&scene.layers, scene.player.position, screen) {
        match item {
            DrawItem::Tree { image, z, scale } => {
                draw_tree(scene, surface, screen, image, scale, shake * shake_factor(z))
            }
            DrawItem::Field { z, .. } => draw_field(scene, surface, screen, z),
            DrawItem::Disc {
                disc,
                z,
                center,
                radius,
            } => draw_disc(surface, &disc, z, center, radius),
        }
    }

    surface.set_alpha(1.0);
    surface.restore();

    if settings.show_prompt {
        draw_prompt(surface, screen, &settings.prompt_text());
    }
}

fn draw_loading<S: Surface>(scene: &Scene, surface: &mut S, screen: Vec2) {
    surface.fill_rect(Rect::new(0.0, 0.0, screen.x, screen.y), LOADING_BACKGROUND);

    let center = screen * 0.5;
    surface.fill_text(
        "Loading...",
        center,
        &TextStyle::centered("30px monospace", TEXT_COLOR),
    );
    surface.fill_text(
        &format!(
            "{} / {} images loaded",
            scene.assets.loaded_count(),
            scene.assets.total()
        ),
        center + Vec2::new(0.0, 40.0),
        &TextStyle::centered("20px monospace", TEXT_COLOR),
    );
}

fn draw_background<S: Surface>(scene: &Scene, surface: &mut S, screen: Vec2) {
    match scene.assets.dimensions(AssetId::Sky) {
        Some(dims) => surface.draw_image(AssetId::Sky, cover_rect(screen, dims)),
        None => surface.fill_vertical_gradient(
            Rect::new(0.0, 0.0, screen.x, screen.y),
            &SKY_GRADIENT,
        ),
    }
}

fn draw_middle<S: Surface>(scene: &Scene, surface: &mut S, screen: Vec2) {
    let Some(aspect) = scene.assets.aspect(AssetId::Middle) else {
        return;
    };
    let Some(layer) = scene.layers.iter().find(|l| l.kind == LayerKind::Middle) else {
        return;
    };

    let z = (layer.depth - scene.player.position) as f32;
    if let Some((rect, alpha)) = middle_placement(z, screen, aspect) {
        surface.set_alpha(alpha);
        surface.draw_image(AssetId::Middle, rect);
        surface.set_alpha(1.0);
    }
}

fn draw_tree<S: Surface>(
    scene: &Scene,
    surface: &mut S,
    screen: Vec2,
    image: u8,
    scale: f32,
    offset: Vec2,
) {
    let id = AssetId::Near(image);
    let Some(aspect) = scene.assets.aspect(id) else {
        return;
    };
    let Some(rect) = tree_rect(scale, screen, aspect) else {
        return;
    };

    surface.save();
    surface.translate(offset);
    surface.set_alpha(1.0);
    surface.draw_image(id, rect);
    surface.restore();
}

fn draw_field<S: Surface>(scene: &Scene, surface: &mut S, screen: Vec2, z: f32) {
    let Some(aspect) = scene.assets.aspect(AssetId::Field) else {
        return;
    };
    if let Some((rect, alpha)) = field_placement(z, screen, aspect) {
        surface.set_alpha(alpha);
        surface.draw_image(AssetId::Field, rect);
        surface.set_alpha(1.0);
    }
}

fn draw_disc<S: Surface>(surface: &mut S, disc: &Disc, z: f32, center: Vec2, radius: f32) {
    surface.set_alpha(disc_alpha(z));
    surface.fill_circle(center, radius, disc.color);

    if let Some(number) = disc.number {
        if radius > 10.0 {
            surface.set_alpha(1.0);
            let style = TextStyle {
                baseline: TextBaseline::Middle,
                ..TextStyle::centered(
                    format!("bold {}px monospace", (radius * 0.4).max(12.0).round()),
                    "white",
                )
            };
            surface.fill_text(&number.to_string(), center, &style);
        }
    }
}

fn draw_prompt<S: Surface>(surface: &mut S, screen: Vec2, text: &str) {
    let style = TextStyle {
        shadow: Some(Shadow {
            color: PROMPT_SHADOW,
            blur: 4.0,
            offset: Vec2::new(2.0, 2.0),
        }),
        ..TextStyle::centered("24px Georgia, serif", TEXT_COLOR)
    };
    surface.fill_text(text, Vec2::new(screen.x / 2.0, screen.y - 40.0), &style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetStatus;
    use crate::error::AssetError;
    use crate::renderer::{DrawCall, RecordingSurface};
    use crate::sim::{Layer, TickInput, tick};
    use crate::tuning::Tuning;

    fn loaded_scene() -> Scene {
        let mut scene = Scene::new(7, Tuning::default());
        for id in AssetId::all() {
            scene.assets.record(id, Ok((400, 200)));
        }
        scene
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(1280.0, 720.0)
    }

    #[test]
    fn test_loading_gate() {
        let mut scene = Scene::new(7, Tuning::default());
        for id in [AssetId::Sky, AssetId::Middle, AssetId::Field] {
            scene.assets.record(id, Ok((100, 100)));
        }
        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);

        assert_eq!(out.texts(), vec!["Loading...", "3 / 11 images loaded"]);
        assert!(out.images().is_empty());
        assert!(
            !out.calls
                .iter()
                .any(|c| matches!(c, DrawCall::Gradient { .. } | DrawCall::Circle { .. }))
        );
        match &out.calls[0] {
            DrawCall::FillRect { color, .. } => assert_eq!(color, LOADING_BACKGROUND),
            other => panic!("expected background fill, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_asset_holds_loading() {
        let mut scene = loaded_scene();
        scene
            .assets
            .record(AssetId::Near(2), Err(AssetError::load("near-layer-3.png")));
        assert_eq!(scene.assets.status(AssetId::Near(2)), AssetStatus::Failed);

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        assert!(out.texts().contains(&"10 / 11 images loaded"));
        assert!(out.images().is_empty());
    }

    #[test]
    fn test_running_frame_order() {
        let scene = loaded_scene();
        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);

        let images = out.images();
        assert_eq!(images[0], AssetId::Sky);
        assert_eq!(images[1], AssetId::Middle);
        // The first tree is 70 behind the walker, inside the pass-behind margin,
        // so it is the nearest layer and drawn last
        assert_eq!(*images.last().unwrap(), AssetId::Near(0));
        assert_eq!(out.texts(), vec!["press w to walk home."]);
        assert_eq!(out.stack_depth(), 0);
    }

    #[test]
    fn test_sky_fallback_gradient() {
        let mut scene = Scene::new(7, Tuning::default());
        for id in AssetId::all() {
            scene.assets.record(id, Ok((400, 200)));
        }
        // A zero-sized image reports no usable dimensions
        scene.assets.record(AssetId::Sky, Ok((0, 0)));

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        assert!(matches!(out.calls[0], DrawCall::Gradient { ref stops, .. } if stops.len() == 3));
        assert!(!out.images().contains(&AssetId::Sky));
    }

    #[test]
    fn test_tree_shake_offsets() {
        let mut scene = loaded_scene();
        let walk = TickInput {
            advance: true,
            ..Default::default()
        };
        for _ in 0..90 {
            tick(&mut scene, &walk);
        }
        assert!(scene.player.shake() != Vec2::ZERO);

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        let offsets: Vec<Vec2> = out
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image {
                    image: AssetId::Near(_),
                    offset,
                    ..
                } => Some(*offset),
                _ => None,
            })
            .collect();
        assert!(offsets.iter().any(|o| *o != Vec2::ZERO));
        // Farther layers (drawn first) shake less
        assert!(offsets.first().unwrap().length() <= offsets.last().unwrap().length());

        let calm = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let mut out = surface();
        render(&scene, &calm, &mut out);
        assert!(out.calls.iter().all(|c| match c {
            DrawCall::Image { offset, .. } => *offset == Vec2::ZERO,
            _ => true,
        }));
    }

    #[test]
    fn test_field_alpha_and_no_shake() {
        let mut scene = loaded_scene();
        scene.player.bob = 3.0;
        scene.player.sway = 1.0;

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        let fields: Vec<(f32, Vec2)> = out
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image {
                    image: AssetId::Field,
                    alpha,
                    offset,
                    ..
                } => Some((*alpha, *offset)),
                _ => None,
            })
            .collect();
        assert_eq!(fields.len(), 4);
        for (alpha, offset) in fields {
            assert!((FIELD_MIN_ALPHA..=1.0).contains(&alpha));
            assert_eq!(offset, Vec2::ZERO);
        }
    }

    #[test]
    fn test_middle_hidden_once_reached() {
        let mut scene = loaded_scene();
        scene.player.position = MIDDLE_LAYER_DEPTH + 1.0;
        crate::sim::recycle_layers(&mut scene.layers, scene.player.position);

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        assert!(!out.images().contains(&AssetId::Middle));
        assert!(out.images().iter().any(|i| matches!(i, AssetId::Near(_))));
    }

    #[test]
    fn test_disc_numbers() {
        let disc = Disc {
            offset: Vec2::ZERO,
            size: 40.0,
            color: "#ff0000",
            number: Some(5),
        };
        let mut scene = Scene::with_layers(
            1,
            Tuning::default(),
            vec![Layer::new(scene_depth(300.0), LayerKind::Disc(disc))],
        );
        for id in AssetId::all() {
            scene.assets.record(id, Ok((400, 200)));
        }
        let settings = Settings {
            show_prompt: false,
            ..Settings::default()
        };

        let mut out = surface();
        render(&scene, &settings, &mut out);
        assert!(out.calls.iter().any(|c| matches!(
            c,
            DrawCall::Circle { radius, alpha, .. } if *radius == 40.0 && *alpha == 1.0
        )));
        assert_eq!(out.texts(), vec!["5"]);
        assert!(out.calls.iter().any(|c| matches!(
            c,
            DrawCall::Text { font, .. } if font == "bold 16px monospace"
        )));
    }

    #[test]
    fn test_far_walk_still_draws_trees() {
        let mut scene = loaded_scene();
        scene.player.position = 1.0e9 + 37.5;
        crate::sim::recycle_layers(&mut scene.layers, scene.player.position);

        let mut out = surface();
        render(&scene, &Settings::default(), &mut out);
        let trees = out
            .images()
            .iter()
            .filter(|i| matches!(i, AssetId::Near(_)))
            .count();
        assert!(trees > 10);
        assert!(!out.images().contains(&AssetId::Middle));
    }

    fn scene_depth(z: f64) -> f64 {
        START_POSITION + z
    }
}
