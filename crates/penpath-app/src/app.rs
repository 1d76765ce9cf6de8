//! Main application state and event loop.

use peniko::Color;
use penpath_core::canvas::Canvas;
use penpath_core::config::{ConfigResult, PenConfig};
use penpath_render::{RenderContext, Renderer, RendererError, VelloRenderer};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;

/// Environment variable naming an optional pen config JSON file.
pub const CONFIG_ENV_VAR: &str = "PENPATH_CONFIG";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub show_grid: bool,
    pub pen: PenConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Penpath".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::WHITE,
            show_grid: false,
            pen: PenConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default configuration with the pen settings loaded from `path`.
    pub fn with_pen_config_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Ok(Self {
            pen: PenConfig::load(path)?,
            ..Self::default()
        })
    }

    /// Configuration from the environment.
    ///
    /// If `PENPATH_CONFIG` names a file, the pen settings are read from it.
    /// A missing or malformed file is logged and the defaults are used.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::with_pen_config_file(&path).unwrap_or_else(|e| {
                log::warn!(
                    "Ignoring {} ({}): {}",
                    CONFIG_ENV_VAR,
                    Path::new(&path).display(),
                    e
                );
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    path_renderer: VelloRenderer,
    /// Texture blitter for RGBA->surface format conversion
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // State
    canvas: Canvas,
    event_handler: EventHandler,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// First fatal error, reported when the event loop returns.
    error: Option<AppError>,
}

impl App {
    /// Create a new application with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub async fn run(mut self) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Create the window, surface and renderers.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, RendererError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| RendererError::InitFailed(e.to_string()))?,
        );

        log::info!("Window created, initializing renderer...");

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };

        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self
            .render_cx
            .get_or_insert_with(vello::util::RenderContext::new);

        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm; the surface format may differ
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let event_handler = EventHandler::new(window.scale_factor());
        let mut canvas = Canvas::with_config(self.config.pen.clone());
        if let Some(viewport) = event_handler.logical_viewport(width, height) {
            canvas.set_viewport_size(viewport.width, viewport.height);
        }

        window.request_redraw();

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            path_renderer: VelloRenderer::new(),
            texture_blitter,
            canvas,
            event_handler,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{}", error);
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// Build the scene and present it.
    fn render(&mut self) -> Result<(), RendererError> {
        let (Some(state), Some(render_cx)) = (self.state.as_mut(), self.render_cx.as_ref()) else {
            return Ok(());
        };

        let width = state.surface.config.width;
        let height = state.surface.config.height;

        let ctx = RenderContext::new(&state.canvas, kurbo::Size::new(width as f64, height as f64))
            .with_scale_factor(state.event_handler.scale_factor())
            .with_background(self.config.background_color)
            .with_grid(self.config.show_grid);
        state.path_renderer.build_scene(&ctx);
        let base_color = state.path_renderer.background_color(&ctx);

        let device_handle = &render_cx.devices[state.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = match state.surface.surface.get_current_texture() {
            Ok(t) => t,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                return Ok(());
            }
        };

        let params = RenderParams {
            base_color,
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Intermediate texture: Vello's compute shaders need StorageBinding,
        // which is only guaranteed for Rgba8Unorm.
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        state
            .vello_renderer
            .render_to_texture(
                device,
                queue,
                state.path_renderer.scene(),
                &render_texture_view,
                &params,
            )
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
            label: Some("blit encoder"),
        });
        state
            .texture_blitter
            .copy(device, &mut encoder, &render_texture_view, &surface_view);
        queue.submit(std::iter::once(encoder.finish()));

        surface_texture.present();
        Ok(())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::RedrawRequested) {
            if let Err(e) = self.render() {
                log::error!("Render failed: {}", e);
            }
            return;
        }

        let Some(state) = self.state.as_mut() else {
            return;
        };

        let changed = match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, {} path(s) drawn", state.canvas.paths.len());
                event_loop.exit();
                false
            }
            WindowEvent::Resized(size) => {
                // Minimized windows report 0x0; the surface cannot be configured with it
                let Some(viewport) = state.event_handler.logical_viewport(size.width, size.height)
                else {
                    return;
                };
                if let Some(render_cx) = self.render_cx.as_ref() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }
                state.canvas.set_viewport_size(viewport.width, viewport.height);
                true
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                log::debug!("Scale factor changed to {}", scale_factor);
                state.event_handler.set_scale_factor(scale_factor);
                let config = &state.surface.config;
                if let Some(viewport) = state.event_handler.logical_viewport(config.width, config.height) {
                    state.canvas.set_viewport_size(viewport.width, viewport.height);
                }
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                state.event_handler.cursor_moved(&mut state.canvas, position)
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => state
                .event_handler
                .mouse_input(&mut state.canvas, button_state, button),
            WindowEvent::ModifiersChanged(modifiers) => {
                state
                    .event_handler
                    .modifiers_changed(&mut state.canvas, modifiers.state());
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    state
                        .event_handler
                        .key_pressed(&mut state.canvas, &event.logical_key);
                    true
                } else {
                    false
                }
            }
            _ => false,
        };

        if changed {
            state.window.request_redraw();
        }
    }
}
