//! Editable Bezier paths.

mod segment;
mod style;

pub use segment::Segment;
pub use style::{LineCap, LineJoin, PathStyle, SerializableColor};

use kurbo::BezPath;
use serde::{Deserialize, Serialize};

/// An ordered sequence of segments with presentation attributes.
///
/// Segment order is curve traversal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditPath {
    segments: Vec<Segment>,
    /// Stroke styling.
    pub style: PathStyle,
    /// Whether the path is currently being edited.
    #[serde(default)]
    pub selected: bool,
}

impl EditPath {
    /// Create an empty path with the given style.
    pub fn new(style: PathStyle) -> Self {
        Self {
            segments: Vec::new(),
            style,
            selected: false,
        }
    }

    /// Create a path seeded with a single segment.
    pub fn with_segment(style: PathStyle, segment: Segment) -> Self {
        let mut path = Self::new(style);
        path.push(segment);
        path
    }

    /// Append a segment.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Remove and return the last segment.
    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

    /// Remove all segments, keeping the style.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&Segment> {
        self.segments.first()
    }

    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Segment> {
        self.segments.last_mut()
    }

    /// Convert to a kurbo path for rendering.
    ///
    /// Pairs of segments whose adjoining handles are both zero become straight
    /// lines; everything else becomes a cubic.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.segments.first() else {
            return path;
        };
        path.move_to(first.point);

        for pair in self.segments.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if from.handle_out == kurbo::Vec2::ZERO && to.handle_in == kurbo::Vec2::ZERO {
                path.line_to(to.point);
            } else {
                path.curve_to(from.handle_out_point(), to.handle_in_point(), to.point);
            }
        }
        path
    }
}
