//! Simulation context
//!
//! Owns every piece of mutable simulation state (bodies, trail layer, time,
//! RNG, energy baseline) and advances it once per display frame. Nothing
//! survives outside this value between host re-mounts.

use std::collections::BTreeMap;

use crate::consts::MASS_EPSILON;
use crate::params::{ParamsPatch, SimulationParams};
use crate::renderer::{DrawSurface, TrailRenderer, TrailStyle};
use crate::sim::{
    Body, BodyFactory, Clock, EnergyMonitor, EnergySnapshot, MonotonicClock, RandomSource,
    RngSeeder, SimRng, TimeController, Warning, derive_warnings,
};
use crate::{Rgba, Viewport};

pub use crate::renderer::{FrameOutcome, Renderer};

/// Default background color
pub const BACKGROUND: Rgba = Rgba::opaque(18, 18, 28);

/// Options for a host-triggered reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOptions {
    /// Keep the simulation paused if it already was
    pub preserve_pause: bool,
    /// Force the layout seed instead of asking the seeder
    pub seed: Option<u64>,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            preserve_pause: true,
            seed: None,
        }
    }
}

/// Single owner of the running simulation
pub struct SimulationContext<S: DrawSurface, C: Clock = MonotonicClock> {
    params: SimulationParams,
    time: TimeController<C>,
    seeder: RngSeeder,
    rng: SimRng,
    surface: S,
    trail: Option<TrailRenderer<S::Layer>>,
    viewport: Option<Viewport>,
    background: Rgba,
    bodies: Vec<Body>,
    /// Body count the current list was built for
    built_for: i32,
    /// Global mass seen on the previous frame
    last_mass: Option<f32>,
    energy: EnergyMonitor,
    last_energy: Option<EnergySnapshot>,
    metrics: BTreeMap<String, String>,
    warnings: Vec<Warning>,
}

impl<S: DrawSurface> SimulationContext<S, MonotonicClock> {
    /// Context on the real monotonic clock
    pub fn with_monotonic_clock(params: SimulationParams, surface: S) -> Self {
        Self::new(params, surface, MonotonicClock::default())
    }
}

impl<S: DrawSurface, C: Clock> SimulationContext<S, C> {
    /// Create an uninitialized context; call `Renderer::init` before stepping
    pub fn new(params: SimulationParams, surface: S, clock: C) -> Self {
        let params = params.sanitized();
        let mut time = TimeController::new(clock);
        time.set_time_scale(params.time_scale);

        let mut seeder = RngSeeder::new();
        seeder.retain(params.random_seed);

        let mut ctx = Self {
            params,
            time,
            seeder,
            rng: SimRng::new(0),
            surface,
            trail: None,
            viewport: None,
            background: BACKGROUND,
            bodies: Vec::new(),
            built_for: 0,
            last_mass: None,
            energy: EnergyMonitor::new(),
            last_energy: None,
            metrics: BTreeMap::new(),
            warnings: Vec::new(),
        };
        ctx.refresh_warnings();
        ctx
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Read-only metrics for the host ("Total Energy", ...)
    pub fn metrics(&self) -> &BTreeMap<String, String> {
        &self.metrics
    }

    /// Current warnings, replaced wholesale every frame
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn energy(&self) -> Option<EnergySnapshot> {
        self.last_energy
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn trail(&self) -> Option<&TrailRenderer<S::Layer>> {
        self.trail.as_ref()
    }

    /// Seed the current layout was built from
    pub fn seed(&self) -> u64 {
        self.seeder.retained()
    }

    pub fn elapsed(&self) -> f64 {
        self.time.elapsed()
    }

    pub fn is_paused(&self) -> bool {
        self.time.is_paused()
    }

    pub fn set_pause(&mut self, paused: bool) {
        self.time.set_pause(paused);
    }

    pub fn set_background(&mut self, color: Rgba) {
        self.background = color;
    }

    /// Parameter-change notification from the host
    pub fn set_params(&mut self, params: SimulationParams) {
        let params = params.sanitized();

        if params.deterministic && !self.params.deterministic {
            self.seeder.retain(params.random_seed);
        }
        if params.time_scale != self.time.time_scale() {
            self.time.set_time_scale(params.time_scale);
        }

        self.params = params;
        self.refresh_warnings();
    }

    /// Merge a partial update into the current parameters
    pub fn update_params(&mut self, patch: &ParamsPatch) {
        self.set_params(self.params.patched(patch));
    }

    /// Merge an experiment preset and rebuild the scene
    pub fn apply_experiment(&mut self, patch: &ParamsPatch) {
        log::info!("Applying experiment: {:?}", patch);
        self.update_params(patch);
        self.reset(ResetOptions::default());
    }

    /// Reinitialize bodies, timers, energy baseline and trails in one go
    pub fn reset(&mut self, opts: ResetOptions) {
        let was_paused = self.time.is_paused();
        self.time.reset();
        self.time.set_pause(opts.preserve_pause && was_paused);

        let seed = match opts.seed {
            Some(seed) => {
                self.seeder.retain(seed);
                seed
            }
            None => self.seeder.seed(&self.params),
        };
        self.rng.random_seed(seed);

        self.energy.reset();
        self.last_energy = None;
        self.last_mass = None;

        if let Some(viewport) = self.viewport {
            self.bodies =
                BodyFactory::create(self.params.num_bodies, &self.params, viewport, seed, &mut self.rng);
            if let Some(trail) = self.trail.as_mut() {
                trail.clear();
            }
        } else {
            self.bodies.clear();
        }
        self.built_for = self.params.num_bodies;

        self.refresh_metrics();
        self.refresh_warnings();
        log::info!(
            "Reset: {} bodies, seed {}, paused={}",
            self.bodies.len(),
            seed,
            self.time.is_paused()
        );
    }

    fn rebuild_bodies(&mut self, viewport: Viewport) {
        let seed = self.seeder.seed(&self.params);
        self.rng.random_seed(seed);
        self.bodies =
            BodyFactory::create(self.params.num_bodies, &self.params, viewport, seed, &mut self.rng);
        // Fresh bodies already carry the current mass
        self.last_mass = Some(self.params.mass);
        log::info!(
            "Body count {} -> {}, rebuilt list",
            self.built_for,
            self.params.num_bodies
        );
        self.built_for = self.params.num_bodies;
    }

    /// Push live parameters into each body, then integrate
    fn advance_bodies(&mut self, dt: f32, viewport: Viewport) {
        let params = &self.params;
        let world = viewport.world_size();
        let current_mass = params.mass;

        let mass_ratio = match self.last_mass {
            Some(last) if last > 0.0 && (last - current_mass).abs() > MASS_EPSILON => {
                log::debug!("Mass {} -> {}, rescaling velocities", last, current_mass);
                Some(current_mass / last)
            }
            _ => None,
        };
        let damping = (params.energy_dissipation && params.damping_coefficient < 1.0)
            .then_some(params.damping_coefficient);

        for body in &mut self.bodies {
            body.params.gravity = params.gravity;
            body.params.restitution = params.restitution;
            body.params.friction_mu = params.friction_mu;

            if let Some(ratio) = mass_ratio {
                body.rescale_mass(ratio);
            }
            if let Some(coefficient) = damping {
                body.apply_damping(coefficient);
            }

            body.step(dt, world);
        }

        self.last_mass = Some(current_mass);
    }

    fn refresh_metrics(&mut self) {
        self.metrics.clear();
        self.metrics
            .insert("Bodies".into(), self.bodies.len().to_string());
        let collisions: u64 = self.bodies.iter().map(|b| b.collision_count as u64).sum();
        self.metrics
            .insert("Collisions".into(), collisions.to_string());
        self.metrics
            .insert("Elapsed Time".into(), format!("{:.2} s", self.time.elapsed()));

        if let Some(snapshot) = self.last_energy {
            self.metrics
                .insert("Total Energy".into(), format!("{:.2} J", snapshot.total));
            let drift = snapshot
                .drift()
                .map(|d| format!("{:.1} %", d))
                .unwrap_or_else(|| "n/a".into());
            self.metrics.insert("Energy Drift".into(), drift);
        }
    }

    fn refresh_warnings(&mut self) {
        let drift = self.last_energy.and_then(|s| s.drift());
        self.warnings = derive_warnings(self.params.num_bodies, drift);
    }
}

impl<S: DrawSurface, C: Clock> Renderer for SimulationContext<S, C> {
    fn init(&mut self, viewport: Viewport) {
        self.surface.resize(viewport.width, viewport.height);
        self.trail = Some(TrailRenderer::new(&mut self.surface, viewport));
        self.viewport = Some(viewport);
        self.surface.draw_background(self.background);
        log::info!("Init {}x{} viewport", viewport.width, viewport.height);

        self.reset(ResetOptions::default());
    }

    fn step(&mut self) -> FrameOutcome {
        let Some(viewport) = self.viewport else {
            return FrameOutcome::Skipped;
        };

        let dt = self.time.compute_delta();
        if dt <= 0.0 {
            return FrameOutcome::Skipped;
        }

        if self.params.num_bodies != self.built_for {
            self.rebuild_bodies(viewport);
        }

        self.advance_bodies(dt, viewport);

        if let Some(trail) = self.trail.as_mut() {
            let style = TrailStyle::new(self.params.trail_enabled, self.params.trail_length);
            trail.draw_frame(&mut self.surface, self.background, &self.bodies, style);
        }

        let world = viewport.world_size();
        self.last_energy = self.energy.update(&self.bodies, world);
        self.refresh_metrics();
        self.refresh_warnings();

        FrameOutcome::Advanced { dt }
    }

    fn on_resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport.width, viewport.height);
        if let Some(trail) = self.trail.as_mut() {
            trail.resize(&mut self.surface, viewport);
        }
        self.viewport = Some(viewport);
        log::info!("Resized to {}x{}, trails dropped", viewport.width, viewport.height);
    }

    fn teardown(&mut self) {
        self.bodies.clear();
        self.trail = None;
        self.viewport = None;
        self.last_energy = None;
        self.last_mass = None;
        self.energy.reset();
        self.metrics.clear();
        self.warnings.clear();
        log::info!("Simulation torn down");
    }
}
