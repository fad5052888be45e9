//! Simulation parameters
//!
//! Owned by the host UI and handed to the core on every change. The core
//! only reads them; omitted fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Global parameter set for the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParams {
    /// Number of bodies (non-positive means an empty simulation)
    pub num_bodies: i32,
    /// Base mass in kg (each body gets a random multiple)
    pub mass: f32,
    /// Base diameter in meters (each body gets a random multiple)
    pub size: f32,
    /// Downward acceleration in m/s²
    pub gravity: f32,
    /// Fraction of normal velocity kept on a wall hit (0-1)
    pub restitution: f32,
    /// Fraction of tangential velocity removed on a wall hit
    pub friction_mu: f32,
    /// Reuse a fixed seed so the layout is reproducible
    pub deterministic: bool,
    /// Seed for deterministic mode (0 = unset)
    pub random_seed: u64,
    /// Simulation speed multiplier (0.1 - 2.0)
    pub time_scale: f32,
    /// Apply velocity damping every frame
    pub energy_dissipation: bool,
    /// Per-frame velocity multiplier when dissipation is on (0-1)
    pub damping_coefficient: f32,
    /// Draw fading trails
    pub trail_enabled: bool,
    /// Frames a trail takes to fade out
    pub trail_length: u32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_bodies: 5,
            mass: 1.0,
            size: 0.4,
            gravity: 9.81,
            restitution: 0.8,
            friction_mu: 0.1,
            deterministic: false,
            random_seed: 0,
            time_scale: 1.0,
            energy_dissipation: false,
            damping_coefficient: 0.99,
            trail_enabled: true,
            trail_length: DEFAULT_TRAIL_LENGTH,
        }
    }
}

/// Clamp a time scale into the supported range (non-finite → 1.0)
pub fn clamp_time_scale(scale: f32) -> f32 {
    if scale.is_finite() {
        scale.clamp(MIN_TIME_SCALE, MAX_TIME_SCALE)
    } else {
        1.0
    }
}

/// Floor a value that must stay strictly positive
pub fn floor_positive(value: f32) -> f32 {
    if value.is_finite() && value > MIN_POSITIVE {
        value
    } else {
        MIN_POSITIVE
    }
}

impl SimulationParams {
    /// Parse from host JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp every field into its documented range
    pub fn sanitized(mut self) -> Self {
        let before = self.clone();

        self.mass = floor_positive(self.mass);
        self.size = floor_positive(self.size);
        if !self.gravity.is_finite() {
            self.gravity = 0.0;
        }
        self.restitution = clamp_unit(self.restitution);
        self.friction_mu = if self.friction_mu.is_finite() {
            self.friction_mu.max(0.0)
        } else {
            0.0
        };
        self.time_scale = clamp_time_scale(self.time_scale);
        self.damping_coefficient = clamp_unit(self.damping_coefficient);
        self.trail_length = self.trail_length.max(1);

        if self != before {
            log::warn!("Clamped out-of-range simulation parameters: {:?}", before);
        }
        self
    }

    /// Merge a partial update into this parameter set
    pub fn apply_patch(&mut self, patch: &ParamsPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field { self.$field = v; })*
            };
        }
        merge!(
            num_bodies,
            mass,
            size,
            gravity,
            restitution,
            friction_mu,
            deterministic,
            random_seed,
            time_scale,
            energy_dissipation,
            damping_coefficient,
            trail_enabled,
            trail_length,
        );
    }

    /// Returns a patched copy, clamped
    pub fn patched(&self, patch: &ParamsPatch) -> Self {
        let mut next = self.clone();
        next.apply_patch(patch);
        next.sanitized()
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Partial parameter update (host field edit or guided experiment)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParamsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_bodies: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restitution: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friction_mu: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deterministic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_dissipation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damping_coefficient: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trail_length: Option<u32>,
}
