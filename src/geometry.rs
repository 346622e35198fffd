//! Display-to-logical coordinate mapping for the drawing canvas.
//!
//! The canvas bitmap has a fixed logical resolution (400x400 by default) while
//! its on-screen size follows the page layout. Every input event is mapped
//! through the bounding rectangle observed *at that event*, so resizing the
//! page mid-drawing keeps points aligned with the pen.

/// A point in the canvas's logical coordinate space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `[x, y]` pair as consumed by the recognizer.
    pub fn pair(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Raw device coordinates (`clientX` / `clientY`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawPoint {
    pub client_x: f64,
    pub client_y: f64,
}

impl RawPoint {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// The canvas's rendered bounding box in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Logical bitmap resolution of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalSize {
    pub width: f64,
    pub height: f64,
}

impl LogicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Per-axis factors mapping display pixels onto logical units, or `None`
    /// when the display rectangle is collapsed (hidden canvas, zero layout).
    pub fn scale_for(&self, rect: &DisplayRect) -> Option<(f64, f64)> {
        if rect.is_degenerate() {
            return None;
        }
        Some((self.width / rect.width, self.height / rect.height))
    }

    /// Map one raw input sample into logical space.
    pub fn to_logical(&self, raw: RawPoint, rect: &DisplayRect) -> Option<Point> {
        let (sx, sy) = self.scale_for(rect)?;
        Some(Point {
            x: (raw.client_x - rect.left) * sx,
            y: (raw.client_y - rect.top) * sy,
        })
    }
}

/// One input event: where the pointer is and where the canvas was drawn when
/// it fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub raw: RawPoint,
    pub rect: DisplayRect,
}

impl Sample {
    pub fn new(raw: RawPoint, rect: DisplayRect) -> Self {
        Self { raw, rect }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_size_display_doubles_coordinates() {
        let logical = LogicalSize::new(400.0, 400.0);
        let rect = DisplayRect::new(0.0, 0.0, 200.0, 200.0);
        let p = logical.to_logical(RawPoint::new(100.0, 100.0), &rect);
        assert_eq!(p, Some(Point::new(200.0, 200.0)));
    }

    #[test]
    fn test_offset_and_anisotropic_scale() {
        let logical = LogicalSize::new(400.0, 400.0);
        let rect = DisplayRect::new(50.0, 20.0, 800.0, 100.0);
        let p = logical.to_logical(RawPoint::new(450.0, 70.0), &rect).unwrap();
        assert!((p.x - 200.0).abs() < 1e-9);
        assert!((p.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_collapsed_rect_yields_nothing() {
        let logical = LogicalSize::new(400.0, 400.0);
        assert!(logical.scale_for(&DisplayRect::new(0.0, 0.0, 0.0, 200.0)).is_none());
        assert!(logical.scale_for(&DisplayRect::new(0.0, 0.0, 200.0, -1.0)).is_none());
        assert!(logical.scale_for(&DisplayRect::new(0.0, 0.0, f64::NAN, 10.0)).is_none());
    }
}
