//! Vello-based renderer implementation.

use crate::renderer::{OverlayStyle, PathRenderer, RenderContext, Renderer};
use kurbo::{Affine, BezPath, Circle, Point, Rect, Stroke};
use peniko::{Color, Fill};
use penpath_core::overlay::{HandleOverlay, OverlayItem};
use penpath_core::path::EditPath;
use vello::Scene;

/// Spacing of the background grid in canvas units.
const GRID_SIZE: f64 = 20.0;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Stroke an open polyline.
    fn render_polyline(&mut self, points: &[Point], stroke: &Stroke, color: Color, transform: Affine) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        self.scene.stroke(stroke, transform, color, None, &path);
    }

    /// Render a circular marker: filled, then outlined.
    fn render_marker(&mut self, center: Point, radius: f64, style: &OverlayStyle, transform: Affine) {
        let circle = Circle::new(center, radius);
        self.scene.fill(Fill::NonZero, transform, style.fill, None, &circle);
        self.scene.stroke(
            &Stroke::new(style.guide_width),
            transform,
            style.stroke,
            None,
            &circle,
        );
    }
}

impl PathRenderer for VelloRenderer {
    fn render_path(&mut self, path: &EditPath, transform: Affine) {
        if path.len() < 2 {
            return;
        }
        let bez = path.to_bez_path();
        self.scene.stroke(
            &path.style.to_stroke(),
            transform,
            path.style.stroke(),
            None,
            &bez,
        );
    }

    fn render_overlay(&mut self, overlay: &HandleOverlay, style: &OverlayStyle, transform: Affine) {
        let guide = Stroke::new(style.guide_width);
        for item in overlay.items() {
            match item {
                OverlayItem::Guide { points } => {
                    self.render_polyline(points, &guide, style.stroke, transform);
                }
                OverlayItem::Marker { center, radius, .. } => {
                    self.render_marker(*center, *radius, style, transform);
                }
            }
        }
    }

    fn render_grid(&mut self, viewport: Rect, transform: Affine, grid_size: f64) {
        if grid_size <= 0.0 {
            return;
        }
        let grid_color = Color::from_rgba8(200, 200, 200, 100);
        let stroke = Stroke::new(0.5);

        // Vertical lines
        let mut x = (viewport.x0 / grid_size).floor() * grid_size;
        while x <= viewport.x1 {
            let mut path = BezPath::new();
            path.move_to(Point::new(x, viewport.y0));
            path.line_to(Point::new(x, viewport.y1));
            self.scene.stroke(&stroke, transform, grid_color, None, &path);
            x += grid_size;
        }

        // Horizontal lines
        let mut y = (viewport.y0 / grid_size).floor() * grid_size;
        while y <= viewport.y1 {
            let mut path = BezPath::new();
            path.move_to(Point::new(viewport.x0, y));
            path.line_to(Point::new(viewport.x1, y));
            self.scene.stroke(&stroke, transform, grid_color, None, &path);
            y += grid_size;
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        let transform = ctx.transform();

        if ctx.show_grid {
            self.render_grid(ctx.visible_rect(), transform, GRID_SIZE);
        }

        // Finished paths, then the committed path, then the preview on top
        let mut drawn = 0;
        for path in ctx.canvas.visible_paths() {
            self.render_path(path, transform);
            drawn += 1;
        }
        log::trace!("Scene built with {} path(s)", drawn);

        let overlay = ctx.canvas.overlay();
        if !overlay.is_empty() {
            self.render_overlay(&overlay, &ctx.overlay_style, transform);
        }
    }
}
