//! Drawing contract consumed by the core
//!
//! The core never talks to a graphics API directly. A host provides a
//! `DrawSurface` (visible canvas) that can allocate off-screen layers.

use crate::{Rgba, Viewport};

/// Primitive drawing operations, in pixel coordinates
pub trait Canvas {
    /// Reset every pixel to fully transparent
    fn clear(&mut self);
    /// Alpha-blend `color` over the whole canvas
    fn draw_background(&mut self, color: Rgba);
    /// Alpha-blend a filled circle
    fn draw_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);
}

/// The visible surface
pub trait DrawSurface: Canvas {
    /// Off-screen buffer type this surface can composite
    type Layer: Canvas;

    /// Allocate a cleared off-screen layer
    fn create_layer(&mut self, width: u32, height: u32) -> Self::Layer;
    /// Resize the visible surface (content may be lost)
    fn resize(&mut self, width: u32, height: u32);
    /// Draw `layer` onto this surface with its top-left at (x, y)
    fn composite(&mut self, layer: &Self::Layer, x: i32, y: i32);
}

/// Frame-loop lifecycle, driven by a caller-owned loop
pub trait Renderer {
    /// Allocate surfaces and build the initial scene
    fn init(&mut self, viewport: Viewport);
    /// Run one frame
    fn step(&mut self) -> FrameOutcome;
    /// The host viewport changed size
    fn on_resize(&mut self, viewport: Viewport);
    /// Release everything allocated by `init`
    fn teardown(&mut self);
}

/// What a call to `Renderer::step` did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Nothing advanced (paused, no time elapsed, or not initialized)
    Skipped,
    /// Physics advanced by `dt` seconds
    Advanced { dt: f32 },
}
