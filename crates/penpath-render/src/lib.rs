//! Penpath Render Library
//!
//! Renderer abstraction and implementations for Penpath.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{
    OverlayStyle, PathRenderer, RenderContext, RenderResult, Renderer, RendererError,
};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
