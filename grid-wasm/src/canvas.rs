use grid_core::{DrawArea, Point, StrokeStyle, Surface};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::constants::CANVAS_ID;

// Non-deprecated helper to set the stroke style via property assignment.
pub fn set_stroke_style(ctx: &CanvasRenderingContext2d, color: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(color),
    );
}

pub fn init_canvas(
    document: &Document,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
    let cv = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("canvas #cv not found"))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = cv
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2D context not available"))?
        .dyn_into::<CanvasRenderingContext2d>()?;
    Ok((cv, ctx))
}

/// The on-screen page: renderer calls map one to one onto the 2D context.
///
/// A clip is pushed with `save` and popped again on `clear` or drop, so it
/// never outlives the frame that set it.
pub struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
    clipped: bool,
}

impl<'a> CanvasSurface<'a> {
    pub fn new(canvas: &HtmlCanvasElement, ctx: &'a CanvasRenderingContext2d) -> Self {
        CanvasSurface {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            clipped: false,
        }
    }

    fn pop_clip(&mut self) {
        if self.clipped {
            self.ctx.restore();
            self.clipped = false;
        }
    }
}

impl Drop for CanvasSurface<'_> {
    fn drop(&mut self) {
        self.pop_clip();
    }
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self) {
        self.pop_clip();
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn clip(&mut self, area: &DrawArea) {
        self.pop_clip();
        self.ctx.save();
        self.ctx.begin_path();
        self.ctx.rect(area.left, area.top, area.width(), area.height());
        self.ctx.clip();
        self.clipped = true;
    }

    fn set_stroke(&mut self, style: &StrokeStyle) {
        set_stroke_style(self.ctx, &style.color);
        self.ctx.set_line_width(style.width);
        self.ctx.set_line_join("round");
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }
}
