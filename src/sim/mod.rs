//! Deterministic stepping engine
//!
//! Everything here is free of rendering and platform dependencies:
//! - Time comes from an injected clock
//! - Randomness comes from an injected, seedable source
//! - Bodies are stepped in list order

pub mod body;
pub mod energy;
pub mod factory;
pub mod rng;
pub mod time;
pub mod warnings;

pub use body::{Body, BodyParams, BodyState};
pub use energy::{EnergyMonitor, EnergySnapshot};
pub use factory::BodyFactory;
pub use rng::{RandomSource, RngSeeder, SimRng};
pub use time::{Clock, ManualClock, MonotonicClock, TimeController, TimeState};
pub use warnings::{Severity, Warning, WarningId, derive_warnings};
