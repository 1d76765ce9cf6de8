//! Path segment: an anchor with relative tangent handles.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// An anchor point with incoming and outgoing handle offsets.
///
/// Handles are stored relative to the anchor. A zero offset means the curve
/// has no curvature on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Anchor position.
    pub point: Point,
    /// Incoming handle offset.
    pub handle_in: Vec2,
    /// Outgoing handle offset.
    pub handle_out: Vec2,
}

impl Segment {
    /// Create a segment with no handles.
    pub fn new(point: Point) -> Self {
        Self {
            point,
            handle_in: Vec2::ZERO,
            handle_out: Vec2::ZERO,
        }
    }

    /// Create a segment with explicit handle offsets.
    pub fn with_handles(point: Point, handle_in: Vec2, handle_out: Vec2) -> Self {
        Self {
            point,
            handle_in,
            handle_out,
        }
    }

    /// Create a smooth segment at `anchor` whose handles mirror a drag from
    /// `anchor` to `pointer`.
    ///
    /// The outgoing handle tip sits under the pointer, the incoming handle is
    /// its exact opposite.
    pub fn symmetric(anchor: Point, pointer: Point) -> Self {
        let drag = pointer - anchor;
        Self::with_handles(anchor, -drag, drag)
    }

    /// Absolute position of the incoming handle tip.
    pub fn handle_in_point(&self) -> Point {
        self.point + self.handle_in
    }

    /// Absolute position of the outgoing handle tip.
    pub fn handle_out_point(&self) -> Point {
        self.point + self.handle_out
    }

    /// Whether both handles are zero-length.
    pub fn is_corner(&self) -> bool {
        self.handle_in == Vec2::ZERO && self.handle_out == Vec2::ZERO
    }
}
