use crate::geometry::Point;

/// One pen-down-to-pen-up motion. Closed strokes are never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    /// Close a point buffer into a stroke. Empty buffers are not strokes.
    pub fn close(points: Vec<Point>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self { points })
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false for a closed stroke; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `[x, y]` pairs in drawing order.
    pub fn pairs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(Point::pair).collect()
    }
}

/// All strokes of one drawing attempt, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StrokeSet {
    strokes: Vec<Stroke>,
}

impl StrokeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    pub fn pop(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stroke> {
        self.strokes.iter()
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    /// Recognizer input: every stroke as a list of `[x, y]` pairs. Order matters
    /// for matching quality, so it is the drawing order.
    pub fn to_pairs(&self) -> Vec<Vec<[f64; 2]>> {
        self.strokes.iter().map(Stroke::pairs).collect()
    }
}

impl<'a> IntoIterator for &'a StrokeSet {
    type Item = &'a Stroke;
    type IntoIter = std::slice::Iter<'a, Stroke>;

    fn into_iter(self) -> Self::IntoIter {
        self.strokes.iter()
    }
}
