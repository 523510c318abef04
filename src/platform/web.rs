//! Browser glue: canvas 2D surface and image loading

use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::assets::AssetId;
use crate::error::AssetError;
use crate::renderer::{Rect, Surface, TextAlign, TextBaseline, TextStyle};

/// Decoded images by asset
pub type ImageMap = HashMap<AssetId, HtmlImageElement>;

/// Request one image and wait for its load or error event
pub async fn load_image(id: AssetId, stamp: u64) -> Result<HtmlImageElement, AssetError> {
    let image =
        HtmlImageElement::new().map_err(|_| AssetError::dom("cannot create image element"))?;

    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    image.set_src(&id.url(stamp));

    let result = JsFuture::from(promise).await;
    image.set_onload(None);
    image.set_onerror(None);
    result.map_err(|_| AssetError::load(id.file_name()))?;

    Ok(image)
}

/// Look up the canvas and its 2D context
pub fn canvas_context(id: &str) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), AssetError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AssetError::dom("no document"))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id(id)
        .ok_or_else(|| AssetError::dom(format!("no #{} element", id)))?
        .dyn_into()
        .map_err(|_| AssetError::dom(format!("#{} is not a canvas", id)))?;

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| AssetError::dom("getContext failed"))?
        .ok_or_else(|| AssetError::dom("no 2d context"))?
        .dyn_into()
        .map_err(|_| AssetError::dom("not a 2d context"))?;

    Ok((canvas, ctx))
}

/// Match the canvas to the window's inner size
pub fn fit_to_window(canvas: &HtmlCanvasElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let width = window.inner_width().ok().and_then(|v| v.as_f64());
    let height = window.inner_height().ok().and_then(|v| v.as_f64());
    if let (Some(w), Some(h)) = (width, height) {
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);
    }
}

/// `Surface` over a canvas 2D context
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    images: &'a ImageMap,
    size: Vec2,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, images: &'a ImageMap, canvas: &HtmlCanvasElement) -> Self {
        Self {
            ctx,
            images,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        }
    }
}

impl Surface for CanvasSurface<'_> {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_vertical_gradient(&mut self, rect: Rect, stops: &[(f32, &str)]) {
        let gradient = self.ctx.create_linear_gradient(
            rect.x as f64,
            rect.y as f64,
            rect.x as f64,
            (rect.y + rect.h) as f64,
        );
        for (offset, color) in stops {
            let _ = gradient.add_color_stop(*offset, color);
        }
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn draw_image(&mut self, image: AssetId, dest: Rect) {
        let Some(element) = self.images.get(&image) else {
            return;
        };
        if !element.complete() {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            element,
            dest.x as f64,
            dest.y as f64,
            dest.w as f64,
            dest.h as f64,
        );
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_text_align(match style.align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_text_baseline(match style.baseline {
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Middle => "middle",
        });
        if let Some(shadow) = style.shadow {
            self.ctx.set_shadow_color(shadow.color);
            self.ctx.set_shadow_blur(shadow.blur as f64);
            self.ctx.set_shadow_offset_x(shadow.offset.x as f64);
            self.ctx.set_shadow_offset_y(shadow.offset.y as f64);
        }

        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);

        if style.shadow.is_some() {
            self.ctx.set_shadow_blur(0.0);
            self.ctx.set_shadow_offset_x(0.0);
            self.ctx.set_shadow_offset_y(0.0);
        }
        self.ctx.set_text_align("left");
        self.ctx.set_text_baseline("alphabetic");
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        let _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }
}
