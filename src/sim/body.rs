//! Bodies and their integrator
//!
//! A body is a disc bouncing inside the world rectangle. +y points down
//! (screen convention), so gravity adds to `vel.y` and the floor is at
//! `y = world.y`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rgba;
use crate::consts::MIN_POSITIVE;
use crate::params::floor_positive;

/// Per-body physical parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyParams {
    pub mass: f32,
    /// Diameter in meters
    pub size: f32,
    pub gravity: f32,
    pub restitution: f32,
    pub friction_mu: f32,
    pub color: Rgba,
}

/// Kinematic state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// A simulated disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub params: BodyParams,
    pub state: BodyState,
    pub collision_count: u32,
    pub last_collision_pos: Option<Vec2>,
}

impl Body {
    /// New body at rest; mass and size are floored to stay positive
    pub fn new(params: BodyParams, pos: Vec2) -> Self {
        Self {
            params: BodyParams {
                mass: floor_positive(params.mass),
                size: floor_positive(params.size),
                ..params
            },
            state: BodyState {
                pos,
                vel: Vec2::ZERO,
            },
            collision_count: 0,
            last_collision_pos: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.params.size * 0.5
    }

    pub fn momentum(&self) -> Vec2 {
        self.state.vel * self.params.mass
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.params.mass * self.state.vel.length_squared()
    }

    /// Change mass while keeping momentum on both axes
    pub fn set_mass(&mut self, mass: f32) {
        let old = self.params.mass;
        let new = floor_positive(mass);
        if old > 0.0 {
            self.state.vel *= old / new;
        }
        self.params.mass = new;
    }

    /// Scale mass by `ratio`, keeping momentum
    pub fn rescale_mass(&mut self, ratio: f32) {
        self.set_mass(self.params.mass * ratio);
    }

    /// Multiply velocity by `coefficient` (one frame of damping)
    pub fn apply_damping(&mut self, coefficient: f32) {
        self.state.vel *= coefficient.clamp(0.0, 1.0);
    }

    /// Advance by `dt` seconds inside a `world`-sized box.
    ///
    /// Non-positive or non-finite `dt` leaves the body untouched.
    pub fn step(&mut self, dt: f32, world: Vec2) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }

        self.state.vel.y += self.params.gravity * dt;
        self.state.pos += self.state.vel * dt;

        if self.resolve_walls(world) {
            self.collision_count += 1;
            self.last_collision_pos = Some(self.state.pos);
        }
    }

    /// Clamp into the world and reflect; true on any contact
    fn resolve_walls(&mut self, world: Vec2) -> bool {
        let r = self.radius().max(MIN_POSITIVE);
        let keep_tangent = (1.0 - self.params.friction_mu).max(0.0);
        let e = self.params.restitution;
        let BodyState { pos, vel } = &mut self.state;
        let mut hit = false;

        // Floor / ceiling
        if pos.y + r > world.y {
            pos.y = world.y - r;
            vel.y = -vel.y * e;
            vel.x *= keep_tangent;
            hit = true;
        } else if pos.y - r < 0.0 {
            pos.y = r;
            vel.y = -vel.y * e;
            vel.x *= keep_tangent;
            hit = true;
        }

        // Side walls
        if pos.x - r < 0.0 {
            pos.x = r;
            vel.x = -vel.x * e;
            vel.y *= keep_tangent;
            hit = true;
        } else if pos.x + r > world.x {
            pos.x = world.x - r;
            vel.x = -vel.x * e;
            vel.y *= keep_tangent;
            hit = true;
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WORLD: Vec2 = Vec2::new(8.0, 6.0);

    fn body(gravity: f32, restitution: f32, friction_mu: f32) -> Body {
        Body::new(
            BodyParams {
                mass: 2.0,
                size: 0.4,
                gravity,
                restitution,
                friction_mu,
                color: Rgba::opaque(200, 100, 50),
            },
            Vec2::new(4.0, 3.0),
        )
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut b = body(9.81, 0.8, 0.0);
        b.step(0.1, WORLD);
        assert!((b.state.vel.y - 0.981).abs() < 1e-5);
        assert!(b.state.pos.y > 3.0);
        assert_eq!(b.collision_count, 0);
    }

    #[test]
    fn test_floor_rebound_with_restitution() {
        let mut b = body(0.0, 0.8, 0.0);
        b.state.pos = Vec2::new(4.0, WORLD.y - 0.25);
        b.state.vel = Vec2::new(0.0, 2.0);
        b.step(0.1, WORLD);

        assert!((b.state.vel.y - -1.6).abs() < 1e-5);
        assert_eq!(b.state.pos.y, WORLD.y - 0.2);
        assert_eq!(b.collision_count, 1);
        assert_eq!(b.last_collision_pos, Some(b.state.pos));
    }

    #[test]
    fn test_friction_scales_tangential_velocity() {
        let mut b = body(0.0, 1.0, 0.25);
        b.state.pos = Vec2::new(4.0, WORLD.y - 0.25);
        b.state.vel = Vec2::new(1.0, 2.0);
        b.step(0.1, WORLD);
        assert!((b.state.vel.x - 0.75).abs() < 1e-5);
        assert!((b.state.vel.y - -2.0).abs() < 1e-5);
    }

    #[test]
    fn test_friction_above_one_stops_tangent() {
        let mut b = body(0.0, 1.0, 1.5);
        b.state.pos = Vec2::new(0.25, 3.0);
        b.state.vel = Vec2::new(-1.0, 1.0);
        b.step(0.1, WORLD);
        assert_eq!(b.state.vel.y, 0.0);
        assert!((b.state.vel.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_one_count_per_contact_step() {
        let mut b = body(0.0, 0.5, 0.0);
        b.state.pos = Vec2::new(WORLD.x - 0.25, WORLD.y - 0.25);
        b.state.vel = Vec2::new(1.0, 1.0);
        b.step(0.1, WORLD);
        assert_eq!(b.collision_count, 1);

        // Moving away from the corner: no contact
        b.step(0.01, WORLD);
        assert_eq!(b.collision_count, 1);
    }

    #[test]
    fn test_mass_floor_keeps_velocity_finite() {
        let mut b = body(0.0, 1.0, 0.0);
        b.state.vel = Vec2::new(1.0, -1.0);
        b.set_mass(0.0);
        assert_eq!(b.params.mass, MIN_POSITIVE);
        assert!(b.state.vel.is_finite());
    }

    #[test]
    fn test_damping() {
        let mut b = body(0.0, 1.0, 0.0);
        b.state.vel = Vec2::new(2.0, -4.0);
        b.apply_damping(0.5);
        assert_eq!(b.state.vel, Vec2::new(1.0, -2.0));
    }

    proptest! {
        #[test]
        fn prop_non_positive_dt_is_noop(dt in -10.0f32..=0.0, vx in -5.0f32..5.0, vy in -5.0f32..5.0) {
            let mut b = body(9.81, 0.8, 0.1);
            b.state.pos = Vec2::new(WORLD.x - 0.1, WORLD.y - 0.1);
            b.state.vel = Vec2::new(vx, vy);
            let before = b.clone();
            b.step(dt, WORLD);
            prop_assert_eq!(b, before);
        }

        #[test]
        fn prop_mass_change_conserves_momentum(m1 in 0.01f32..100.0, vx in -5.0f32..5.0, vy in -5.0f32..5.0) {
            let mut b = body(0.0, 0.8, 0.1);
            b.state.vel = Vec2::new(vx, vy);
            let p0 = b.momentum();
            b.set_mass(m1);
            let p1 = b.momentum();
            prop_assert!((p0.x - p1.x).abs() <= 1e-4 * (1.0 + p0.x.abs()));
            prop_assert!((p0.y - p1.y).abs() <= 1e-4 * (1.0 + p0.y.abs()));
        }

        #[test]
        fn prop_body_stays_inside_world(vx in -50.0f32..50.0, vy in -50.0f32..50.0, steps in 1usize..200) {
            let mut b = body(9.81, 0.9, 0.1);
            b.state.vel = Vec2::new(vx, vy);
            for _ in 0..steps {
                b.step(1.0 / 60.0, WORLD);
            }
            let r = b.radius();
            prop_assert!(b.state.pos.x >= r - 1e-4 && b.state.pos.x <= WORLD.x - r + 1e-4);
            prop_assert!(b.state.pos.y >= r - 1e-4 && b.state.pos.y <= WORLD.y - r + 1e-4);
        }
    }
}
