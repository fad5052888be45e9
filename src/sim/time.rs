//! Frame timing
//!
//! Converts wall-clock frame intervals into scaled simulation deltas and
//! owns the pause flag. A zero delta means "skip this frame".

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

use crate::consts::MAX_FRAME_DT;
use crate::params::clamp_time_scale;

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Real clock backed by `Instant`
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Host-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward (negative values are ignored)
    pub fn advance(&self, secs: f64) {
        if secs > 0.0 {
            self.now.set(self.now.get() + secs);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Time bookkeeping for one simulation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeState {
    /// Scaled simulation seconds since the last reset
    pub elapsed: f64,
    pub paused: bool,
    pub scale: f32,
}

impl Default for TimeState {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            paused: false,
            scale: 1.0,
        }
    }
}

/// Computes per-frame deltas from a clock
#[derive(Debug)]
pub struct TimeController<C: Clock = MonotonicClock> {
    clock: C,
    last: f64,
    state: TimeState,
}

impl Default for TimeController<MonotonicClock> {
    fn default() -> Self {
        Self::new(MonotonicClock::default())
    }
}

impl<C: Clock> TimeController<C> {
    pub fn new(clock: C) -> Self {
        let last = clock.now();
        Self {
            clock,
            last,
            state: TimeState::default(),
        }
    }

    /// Scaled seconds since the previous call; 0 while paused
    pub fn compute_delta(&mut self) -> f32 {
        let now = self.clock.now();
        let raw = (now - self.last).max(0.0);
        self.last = now;

        if self.state.paused {
            return 0.0;
        }

        let dt = raw.min(MAX_FRAME_DT) * self.state.scale as f64;
        self.state.elapsed += dt;
        dt as f32
    }

    /// Zero the elapsed clock (pause flag untouched)
    pub fn reset(&mut self) {
        self.state.elapsed = 0.0;
        self.last = self.clock.now();
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn set_pause(&mut self, paused: bool) {
        if paused != self.state.paused {
            log::debug!("Time {}", if paused { "paused" } else { "resumed" });
        }
        self.state.paused = paused;
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.state.scale = clamp_time_scale(scale);
    }

    pub fn time_scale(&self) -> f32 {
        self.state.scale
    }

    pub fn elapsed(&self) -> f64 {
        self.state.elapsed
    }
}
