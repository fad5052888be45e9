//! Bounce Lab - a 2D multi-body bounce demonstration
//!
//! Core modules:
//! - `sim`: Deterministic stepping engine (time, RNG, bodies, energy, warnings)
//! - `renderer`: Abstract drawing surface, software raster, trail layer
//! - `context`: Single owner of all simulation state, driven once per frame
//! - `params`: Host-supplied parameter set with defaults and clamping
//! - `experiments`: Guided experiment presets

pub mod context;
pub mod experiments;
pub mod params;
pub mod renderer;
pub mod sim;

pub use context::{FrameOutcome, ResetOptions, SimulationContext};
pub use params::{ParamsPatch, SimulationParams};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Simulation configuration constants
pub mod consts {
    /// Screen pixels per simulated meter
    pub const PIXELS_PER_METER: f32 = 100.0;

    /// Smallest mass/size a body may carry (keeps momentum rescale finite)
    pub const MIN_POSITIVE: f32 = 1e-6;

    /// Global mass changes smaller than this are ignored
    pub const MASS_EPSILON: f32 = 0.001;

    /// Time scale bounds
    pub const MIN_TIME_SCALE: f32 = 0.1;
    pub const MAX_TIME_SCALE: f32 = 2.0;

    /// Longest wall-clock frame we integrate (hidden tab, debugger pause)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Spawn margin from the viewport edges, in pixels
    pub const SPAWN_MARGIN_PX: f32 = 50.0;

    /// Random multiplier ranges applied to the global mass/size
    pub const MASS_MULTIPLIER: (f32, f32) = (0.5, 2.0);
    pub const SIZE_MULTIPLIER: (f32, f32) = (0.5, 1.5);

    /// Trail defaults
    pub const TRAIL_ALPHA: u8 = 60;
    pub const DEFAULT_TRAIL_LENGTH: u32 = 100;

    /// Warning thresholds
    pub const MANY_BODIES_THRESHOLD: i32 = 50;
    pub const ENERGY_DRIFT_THRESHOLD_PCT: f32 = 5.0;
    /// Drift is undefined below this baseline energy (J)
    pub const ENERGY_BASELINE_MIN: f32 = 0.01;
}

/// Convert screen pixels to meters
#[inline]
pub fn to_meters(px: f32) -> f32 {
    px / consts::PIXELS_PER_METER
}

/// Convert meters to screen pixels
#[inline]
pub fn to_pixels(m: f32) -> f32 {
    m * consts::PIXELS_PER_METER
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Visible drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// World extent in meters (x = width, y = height)
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(to_meters(self.width as f32), to_meters(self.height as f32))
    }
}
