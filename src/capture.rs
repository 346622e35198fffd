//! Stroke capture buffer: turns a pointer/touch event sequence into a
//! `StrokeSet`, painting live feedback onto a surface as it goes.
//!
//! Two states only. `Idle -> Drawing` on pointer-down, `Drawing -> Idle` on
//! pointer-up or pointer-leave. Moves while idle (a mouse gliding over the
//! canvas without a press, a late `mousemove` after `mouseup`) are ignored.

use log::debug;

use crate::geometry::{LogicalSize, Point, Sample};
use crate::stroke::{Stroke, StrokeSet};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Drawing,
}

pub struct StrokeCapture<S: Surface> {
    surface: S,
    logical: LogicalSize,
    strokes: StrokeSet,
    open: Option<Vec<Point>>,
}

impl<S: Surface> StrokeCapture<S> {
    pub fn new(surface: S, logical: LogicalSize) -> Self {
        Self {
            surface,
            logical,
            strokes: StrokeSet::new(),
            open: None,
        }
    }

    pub fn state(&self) -> CaptureState {
        if self.open.is_some() {
            CaptureState::Drawing
        } else {
            CaptureState::Idle
        }
    }

    pub fn strokes(&self) -> &StrokeSet {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Pen down. A stroke left open by a missed release is closed first.
    pub fn begin_stroke(&mut self, sample: Sample) {
        let Some(p) = self.logical.to_logical(sample.raw, &sample.rect) else {
            debug!("begin_stroke: canvas has no layout, event ignored");
            return;
        };
        if self.open.is_some() {
            self.end_stroke();
        }
        self.open = Some(vec![p]);
    }

    /// Pen moved. Paints the new segment immediately.
    pub fn extend_stroke(&mut self, sample: Sample) {
        let Some(points) = self.open.as_mut() else {
            return;
        };
        let Some(p) = self.logical.to_logical(sample.raw, &sample.rect) else {
            return;
        };
        if let Some(&prev) = points.last() {
            self.surface.segment(prev, p);
        }
        points.push(p);
    }

    /// Pen up or left the canvas.
    pub fn end_stroke(&mut self) {
        let Some(points) = self.open.take() else {
            return;
        };
        if let Some(stroke) = Stroke::close(points) {
            debug!("stroke {} closed with {} points", self.strokes.len() + 1, stroke.len());
            self.strokes.push(stroke);
        }
    }

    /// Drop the last stroke and repaint the rest from a blank surface, since
    /// painted pixels cannot be taken back one stroke at a time.
    pub fn undo(&mut self) {
        if self.strokes.pop().is_none() {
            return;
        }
        self.redraw();
    }

    pub fn clear(&mut self) {
        self.open = None;
        self.strokes.clear();
        self.surface.clear();
    }

    fn redraw(&mut self) {
        self.surface.clear();
        for stroke in &self.strokes {
            self.surface.polyline(stroke.points());
        }
    }
}
