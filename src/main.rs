//! Parallax Walk entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use parallax_walk::assets::AssetId;
    use parallax_walk::platform::web::{
        CanvasSurface, ImageMap, canvas_context, fit_to_window, load_image,
    };
    use parallax_walk::renderer::render;
    use parallax_walk::sim::{Scene, TickInput, tick};
    use parallax_walk::{AssetError, Settings, Tuning};

    /// Everything the frame loop owns
    struct Game {
        scene: Scene,
        settings: Settings,
        input: TickInput,
        images: ImageMap,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                scene: Scene::new(seed, Tuning::load()),
                settings: Settings::load(),
                input: TickInput::default(),
                images: ImageMap::new(),
                canvas,
                ctx,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance one frame
        fn update(&mut self, dt: f64, time: f64) {
            tick(&mut self.scene, &self.input);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            if self.scene.frame % 600 == 0 {
                log::debug!(
                    "frame {} dt={:.1}ms fps={} position={:.1} velocity={:.3}",
                    self.scene.frame,
                    dt,
                    self.fps,
                    self.scene.player.position,
                    self.scene.player.velocity
                );
            }
        }

        fn render(&self) {
            let mut surface = CanvasSurface::new(&self.ctx, &self.images, &self.canvas);
            render(&self.scene, &self.settings, &mut surface);
        }
    }

    pub async fn run() -> Result<(), AssetError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| AssetError::dom(format!("logger: {}", e)))?;

        log::info!("Parallax Walk starting...");

        let (canvas, ctx) = canvas_context("gameCanvas")?;
        fit_to_window(&canvas);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas, ctx)));
        log::info!("Scene initialized with seed: {}", seed);

        start_loading(game.clone(), seed);
        setup_input_handlers(game.clone());
        setup_resize_handler(game.clone());

        request_animation_frame(game);

        log::info!("Parallax Walk running!");
        Ok(())
    }

    /// One independent load per asset; each result lands in the asset table
    fn start_loading(game: Rc<RefCell<Game>>, stamp: u64) {
        for id in AssetId::all() {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = load_image(id, stamp).await;
                let mut g = game.borrow_mut();
                match result {
                    Ok(image) => {
                        let dims = (image.natural_width(), image.natural_height());
                        g.images.insert(id, image);
                        g.scene.assets.record(id, Ok(dims));
                    }
                    Err(e) => g.scene.assets.record(id, Err(e)),
                }
                if g.scene.assets.is_ready() {
                    log::info!("All {} images loaded", g.scene.assets.total());
                }
            });
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                let keys = g.settings.keys.clone();
                if keys.apply(&mut g.input, &key, true) {
                    return;
                }
                if event.repeat() {
                    return;
                }
                match key.to_ascii_lowercase().as_str() {
                    "m" => {
                        g.settings.reduced_motion = !g.settings.reduced_motion;
                        g.settings.save();
                        log::info!("Reduced motion: {}", g.settings.reduced_motion);
                    }
                    "h" => {
                        g.settings.show_prompt = !g.settings.show_prompt;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let keys = g.settings.keys.clone();
                keys.apply(&mut g.input, &event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_to_window(&game.borrow().canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_scene::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parallax Walk (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_walk();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walk forward for ten seconds, coast to a stop, and report what a frame draws
#[cfg(not(target_arch = "wasm32"))]
fn headless_walk() {
    use parallax_walk::assets::AssetId;
    use parallax_walk::renderer::{RecordingSurface, render};
    use parallax_walk::sim::{Scene, TickInput, tick};
    use parallax_walk::{Settings, Tuning};

    let mut scene = Scene::new(42, Tuning::load());
    for id in AssetId::all() {
        scene.assets.record(id, Ok((1024, 768)));
    }
    let settings = Settings::load();
    let mut surface = RecordingSurface::new(1280.0, 720.0);

    let walk = TickInput {
        advance: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut scene, &walk);
    }
    log::info!(
        "After walking: position={:.2} velocity={:.3}",
        scene.player.position,
        scene.player.velocity
    );

    let idle = TickInput::default();
    while scene.player.velocity != 0.0 {
        tick(&mut scene, &idle);
    }
    log::info!(
        "Stopped at position={:.2} after {} frames",
        scene.player.position,
        scene.frame
    );

    render(&scene, &settings, &mut surface);
    let images = surface.images();
    let trees = images
        .iter()
        .filter(|i| matches!(i, AssetId::Near(_)))
        .count();
    let fields = images.iter().filter(|i| **i == AssetId::Field).count();
    println!(
        "Frame {}: {} draw calls, {} tree layers, {} field layers",
        scene.frame,
        surface.calls.len(),
        trees,
        fields
    );
}
