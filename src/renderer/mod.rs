//! Rendering seam
//!
//! The core draws through the `Canvas`/`DrawSurface` traits only. A
//! software `PixelBuffer` implementation is bundled for headless runs.

pub mod raster;
pub mod surface;
pub mod trail;

pub use raster::PixelBuffer;
pub use surface::{Canvas, DrawSurface, FrameOutcome, Renderer};
pub use trail::{TrailRenderer, TrailStyle};
