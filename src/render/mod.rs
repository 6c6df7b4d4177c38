//! Scene rendering
//!
//! A [`RenderDevice`] creates [`Renderer`]s; each renderer draws one scene
//! into one rectangle of the window. Viewports only talk to these traits, so
//! their lifecycle can be exercised without a GPU.

pub mod gl;

pub use gl::MacroquadDevice;

use crate::scene::{PerspectiveCamera, Scene};
use macroquad::math::Vec2;

/// Creation options for a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererOptions {
    /// Leave the region unpainted so the page behind shows through
    pub transparent: bool,
    pub antialias: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            transparent: true,
            antialias: true,
        }
    }
}

/// Draws a scene into a rectangular region of the window
pub trait Renderer {
    /// Resize the drawing region (logical pixels)
    fn set_size(&mut self, width: f32, height: f32);

    fn size(&self) -> (f32, f32);

    /// Draw `scene` through `camera` with the region's top-left at `origin`
    fn render(&mut self, origin: Vec2, scene: &Scene, camera: &PerspectiveCamera);

    /// Release GPU resources. Rendering after this is a no-op.
    fn dispose(&mut self);

    #[cfg(test)]
    fn is_disposed(&self) -> bool;
}

/// Factory for renderers
pub trait RenderDevice {
    fn create_renderer(&self, options: RendererOptions) -> Box<dyn Renderer>;
}
