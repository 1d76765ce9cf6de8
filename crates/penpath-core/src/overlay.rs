//! Handle overlay: guide lines and markers for the segments being edited.
//!
//! The overlay is never stored. It is recomputed from the current pen state
//! every time it is requested, so stale markers cannot accumulate.

use crate::config::PenConfig;
use crate::path::{EditPath, Segment};
use crate::tools::PenState;
use kurbo::{Point, Vec2};

/// Which handles of a segment to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleSide {
    #[default]
    Both,
    In,
    Out,
}

impl HandleSide {
    /// Whether the incoming handle is shown.
    pub fn includes_in(self) -> bool {
        self != HandleSide::Out
    }

    /// Whether the outgoing handle is shown.
    pub fn includes_out(self) -> bool {
        self != HandleSide::In
    }
}

/// The kind of marker, which determines its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Anchor,
    HandleIn,
    HandleOut,
}

/// A single overlay item.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayItem {
    /// Thin polyline from handle tip through the anchor to the other tip.
    Guide { points: Vec<Point> },
    /// Circle marker.
    Marker {
        kind: MarkerKind,
        center: Point,
        radius: f64,
    },
}

/// Overlay items for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandleOverlay {
    items: Vec<OverlayItem>,
}

impl HandleOverlay {
    /// Build the overlay for the current pen session.
    ///
    /// Shows the committed path's last segment (outgoing handle only while a
    /// drag is in progress) followed by the preview's last segment.
    pub fn build(
        state: &PenState,
        committed: Option<&EditPath>,
        preview: Option<&EditPath>,
        config: &PenConfig,
    ) -> Self {
        let mut overlay = Self::default();
        if !state.is_placing() {
            return overlay;
        }

        let committed_side = if state.is_dragging() {
            HandleSide::Out
        } else {
            HandleSide::Both
        };

        if let Some(seg) = committed.and_then(EditPath::last) {
            overlay.items.extend(Self::for_segment(seg, committed_side, config));
        }
        if let Some(seg) = preview.and_then(EditPath::last) {
            overlay.items.extend(Self::for_segment(seg, HandleSide::Both, config));
        }
        overlay
    }

    /// Overlay items for a single segment.
    pub fn for_segment(seg: &Segment, side: HandleSide, config: &PenConfig) -> Vec<OverlayItem> {
        let mut points = Vec::with_capacity(3);
        if side.includes_in() {
            points.push(seg.handle_in_point());
        }
        points.push(seg.point);
        if side.includes_out() {
            points.push(seg.handle_out_point());
        }

        let mut items = vec![
            OverlayItem::Guide { points },
            OverlayItem::Marker {
                kind: MarkerKind::Anchor,
                center: seg.point,
                radius: config.anchor_radius,
            },
        ];

        let visible = |offset: Vec2| offset.hypot() >= config.handle_min_length;

        if side.includes_in() && visible(seg.handle_in) {
            items.push(OverlayItem::Marker {
                kind: MarkerKind::HandleIn,
                center: seg.handle_in_point(),
                radius: config.handle_radius,
            });
        }
        if side.includes_out() && visible(seg.handle_out) {
            items.push(OverlayItem::Marker {
                kind: MarkerKind::HandleOut,
                center: seg.handle_out_point(),
                radius: config.handle_radius,
            });
        }
        items
    }

    pub fn items(&self) -> &[OverlayItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over markers of a given kind.
    pub fn markers(&self, kind: MarkerKind) -> impl Iterator<Item = Point> + '_ {
        self.items.iter().filter_map(move |item| match item {
            OverlayItem::Marker { kind: k, center, .. } if *k == kind => Some(*center),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathStyle;

    fn seg_with_handle(len: f64) -> Segment {
        Segment::with_handles(Point::ZERO, Vec2::new(-len, 0.0), Vec2::new(len, 0.0))
    }

    fn handle_markers(items: &[OverlayItem]) -> usize {
        items
            .iter()
            .filter(|i| {
                matches!(
                    i,
                    OverlayItem::Marker {
                        kind: MarkerKind::HandleIn | MarkerKind::HandleOut,
                        ..
                    }
                )
            })
            .count()
    }

    #[test]
    fn test_short_handle_has_no_marker() {
        let items = HandleOverlay::for_segment(&seg_with_handle(9.99), HandleSide::Both, &PenConfig::default());
        assert_eq!(handle_markers(&items), 0);
        // Guide and anchor are always drawn
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_handle_at_threshold_has_marker() {
        let items = HandleOverlay::for_segment(&seg_with_handle(10.0), HandleSide::Both, &PenConfig::default());
        assert_eq!(handle_markers(&items), 2);
    }

    #[test]
    fn test_out_side_skips_incoming() {
        let seg = seg_with_handle(20.0);
        let items = HandleOverlay::for_segment(&seg, HandleSide::Out, &PenConfig::default());

        assert_eq!(
            items[0],
            OverlayItem::Guide {
                points: vec![Point::ZERO, Point::new(20.0, 0.0)]
            }
        );
        assert_eq!(handle_markers(&items), 1);
        assert!(items.iter().any(|i| matches!(
            i,
            OverlayItem::Marker { kind: MarkerKind::HandleOut, .. }
        )));
    }

    #[test]
    fn test_in_side_skips_outgoing() {
        let seg = seg_with_handle(20.0);
        let items = HandleOverlay::for_segment(&seg, HandleSide::In, &PenConfig::default());

        assert_eq!(
            items[0],
            OverlayItem::Guide {
                points: vec![Point::new(-20.0, 0.0), Point::ZERO]
            }
        );
        assert_eq!(handle_markers(&items), 1);
    }

    #[test]
    fn test_both_guide_passes_through_anchor() {
        let seg = seg_with_handle(15.0);
        let items = HandleOverlay::for_segment(&seg, HandleSide::Both, &PenConfig::default());
        assert_eq!(
            items[0],
            OverlayItem::Guide {
                points: vec![Point::new(-15.0, 0.0), Point::ZERO, Point::new(15.0, 0.0)]
            }
        );
    }

    #[test]
    fn test_marker_radii() {
        let config = PenConfig::default();
        let items = HandleOverlay::for_segment(&seg_with_handle(12.0), HandleSide::Both, &config);
        for item in &items {
            if let OverlayItem::Marker { kind, radius, .. } = item {
                let expected = match kind {
                    MarkerKind::Anchor => 5.0,
                    MarkerKind::HandleIn | MarkerKind::HandleOut => 3.0,
                };
                assert!((radius - expected).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_idle_overlay_is_empty() {
        let path = EditPath::with_segment(PathStyle::committed(), Segment::new(Point::ZERO));
        let overlay = HandleOverlay::build(&PenState::Idle, Some(&path), Some(&path), &PenConfig::default());
        assert!(overlay.is_empty());
    }

    #[test]
    fn test_dragging_shows_committed_out_side_only() {
        let committed = EditPath::with_segment(PathStyle::committed(), seg_with_handle(20.0));
        let state = PenState::HandleDragging {
            anchor: Point::new(50.0, 0.0),
        };
        let overlay = HandleOverlay::build(&state, Some(&committed), None, &PenConfig::default());

        assert_eq!(overlay.markers(MarkerKind::HandleIn).count(), 0);
        assert_eq!(overlay.markers(MarkerKind::HandleOut).count(), 1);
    }

    #[test]
    fn test_anchor_pending_shows_both_segments() {
        let committed = EditPath::with_segment(PathStyle::committed(), seg_with_handle(20.0));
        let mut preview = EditPath::with_segment(PathStyle::preview(), seg_with_handle(20.0));
        preview.push(Segment::new(Point::new(40.0, 0.0)));

        let overlay = HandleOverlay::build(
            &PenState::AnchorPending,
            Some(&committed),
            Some(&preview),
            &PenConfig::default(),
        );

        let anchors: Vec<_> = overlay.markers(MarkerKind::Anchor).collect();
        assert_eq!(anchors, vec![Point::ZERO, Point::new(40.0, 0.0)]);
        assert_eq!(overlay.markers(MarkerKind::HandleIn).count(), 1);
        assert_eq!(overlay.markers(MarkerKind::HandleOut).count(), 1);
    }
}
