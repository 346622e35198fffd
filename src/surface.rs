//! Rendering targets for captured strokes.
//!
//! All drawing happens in logical coordinates. The canvas surface paints into a
//! `CanvasRenderingContext2d`; the recording surface keeps a log of what would
//! have been painted so redraws can be compared against a clean replay.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::config::StrokeStyle;
use crate::error::ShellError;
use crate::geometry::{LogicalSize, Point};

pub trait Surface {
    /// Wipe the whole logical area.
    fn clear(&mut self);

    /// Paint one straight pen segment.
    fn segment(&mut self, from: Point, to: Point);

    /// Paint a connected run of points as the same segments live drawing
    /// produced, so a redraw matches a clean draw. Fewer than two points paint
    /// nothing.
    fn polyline(&mut self, points: &[Point]) {
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1]);
        }
    }
}

/// Canvas-backed surface.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: LogicalSize,
    style: StrokeStyle,
}

impl CanvasSurface {
    /// Fix the canvas bitmap to `size` and grab its 2d context. The CSS size is
    /// left to the page.
    pub fn new(
        canvas: &HtmlCanvasElement,
        size: LogicalSize,
        style: StrokeStyle,
    ) -> Result<Self, ShellError> {
        canvas.set_width(size.width.round() as u32);
        canvas.set_height(size.height.round() as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(ShellError::NoContext)?
            .dyn_into()
            .map_err(|_| ShellError::NoContext)?;
        Ok(Self { ctx, size, style })
    }

    fn apply_pen(&self) {
        self.ctx.set_line_width(self.style.line_width);
        self.ctx.set_line_cap(&self.style.line_cap);
        self.ctx.set_line_join("round");
        // Property assignment avoids the deprecated JsValue setter.
        let _ = js_sys::Reflect::set(
            self.ctx.as_ref(),
            &JsValue::from_str("strokeStyle"),
            &JsValue::from_str(&self.style.stroke_color),
        );
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.size.width, self.size.height);
    }

    fn segment(&mut self, from: Point, to: Point) {
        self.apply_pen();
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceOp {
    Clear,
    Segment(Point, Point),
}

/// Headless surface that records paint operations.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Segments currently visible: everything painted after the last clear.
    pub fn visible_segments(&self) -> Vec<(Point, Point)> {
        let start = self
            .ops
            .iter()
            .rposition(|op| *op == SurfaceOp::Clear)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.ops[start..]
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Segment(a, b) => Some((*a, *b)),
                SurfaceOp::Clear => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn segment(&mut self, from: Point, to: Point) {
        self.ops.push(SurfaceOp::Segment(from, to));
    }
}
