//! Renderer trait abstraction.

use kurbo::{Affine, Rect, Size};
use peniko::Color;
use penpath_core::canvas::Canvas;
use penpath_core::config::PenConfig;
use penpath_core::overlay::HandleOverlay;
use penpath_core::path::EditPath;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Colors and widths used to draw the handle overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// Guide and marker outline color.
    pub stroke: Color,
    /// Marker fill color.
    pub fill: Color,
    /// Guide polyline width.
    pub guide_width: f64,
}

impl OverlayStyle {
    /// Derive the overlay style from the pen configuration.
    pub fn from_config(config: &PenConfig) -> Self {
        Self {
            stroke: config.overlay_color.into(),
            fill: config.marker_fill.into(),
            guide_width: config.guide_width,
        }
    }
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::from_config(&PenConfig::default())
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Whether to draw the background grid.
    pub show_grid: bool,
    /// Handle overlay styling.
    pub overlay_style: OverlayStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas, viewport_size: Size) -> Self {
        Self {
            canvas,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
            show_grid: false,
            overlay_style: OverlayStyle::from_config(canvas.pen.config()),
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Toggle the background grid.
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Transform from canvas (logical) units to physical pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale_factor)
    }

    /// Visible area in canvas units.
    pub fn visible_rect(&self) -> Rect {
        let scale = if self.scale_factor > 0.0 { self.scale_factor } else { 1.0 };
        Rect::new(
            0.0,
            0.0,
            self.viewport_size.width / scale,
            self.viewport_size.height / scale,
        )
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Drawing primitives shared by renderers.
pub trait PathRenderer {
    /// Stroke an editable path with its own style.
    fn render_path(&mut self, path: &EditPath, transform: Affine);

    /// Draw guide lines and markers.
    fn render_overlay(&mut self, overlay: &HandleOverlay, style: &OverlayStyle, transform: Affine);

    /// Render a grid pattern covering `viewport` (canvas units).
    fn render_grid(&mut self, viewport: Rect, transform: Affine, grid_size: f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(800.0, 600.0));
        assert_eq!(ctx.background_color, Color::WHITE);
        assert!(!ctx.show_grid);
        assert_eq!(ctx.overlay_style, OverlayStyle::default());
    }

    #[test]
    fn test_visible_rect_accounts_for_scale() {
        let canvas = Canvas::new();
        let ctx = RenderContext::new(&canvas, Size::new(1600.0, 1200.0)).with_scale_factor(2.0);
        assert_eq!(ctx.visible_rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(ctx.transform(), Affine::scale(2.0));
    }

    #[test]
    fn test_overlay_style_from_config() {
        let config = PenConfig {
            guide_width: 2.5,
            ..PenConfig::default()
        };
        let style = OverlayStyle::from_config(&config);
        assert!((style.guide_width - 2.5).abs() < f64::EPSILON);
        assert_eq!(style.fill, Color::WHITE);
    }
}
