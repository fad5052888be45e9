//! Mechanical energy tracking
//!
//! Drift between consecutive snapshots is the instability signal fed to
//! the warning engine.

use glam::Vec2;
use serde::Serialize;

use super::body::Body;
use crate::consts::ENERGY_BASELINE_MIN;

/// Total energy for one frame, with the previous frame's total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySnapshot {
    pub total: f32,
    pub previous: Option<f32>,
}

impl EnergySnapshot {
    /// Percent change from the previous total; `None` without a usable baseline
    pub fn drift(&self) -> Option<f32> {
        let previous = self.previous?;
        if previous > ENERGY_BASELINE_MIN {
            Some((self.total - previous).abs() / previous * 100.0)
        } else {
            None
        }
    }
}

/// Kinetic + potential energy of one body; height is measured from the floor
pub fn body_energy(body: &Body, world: Vec2) -> f32 {
    let height = (world.y - (body.state.pos.y + body.radius())).max(0.0);
    body.kinetic_energy() + body.params.mass * body.params.gravity * height
}

/// Tracks the energy baseline across frames
#[derive(Debug, Clone, Default)]
pub struct EnergyMonitor {
    previous: Option<f32>,
}

impl EnergyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `bodies`; an empty list yields nothing and keeps the baseline
    pub fn update(&mut self, bodies: &[Body], world: Vec2) -> Option<EnergySnapshot> {
        if bodies.is_empty() {
            return None;
        }

        let total: f32 = bodies.iter().map(|b| body_energy(b, world)).sum();
        let snapshot = EnergySnapshot {
            total,
            previous: self.previous,
        };
        self.previous = Some(total);
        Some(snapshot)
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }

    pub fn baseline(&self) -> Option<f32> {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;
    use crate::sim::body::BodyParams;

    const WORLD: Vec2 = Vec2::new(8.0, 6.0);

    fn body_at(y: f32, vel: Vec2) -> Body {
        let mut b = Body::new(
            BodyParams {
                mass: 2.0,
                size: 1.0,
                gravity: 10.0,
                restitution: 1.0,
                friction_mu: 0.0,
                color: Rgba::opaque(0, 0, 0),
            },
            Vec2::new(4.0, y),
        );
        b.state.vel = vel;
        b
    }

    #[test]
    fn test_body_energy() {
        // Resting on the floor: kinetic only
        let b = body_at(5.5, Vec2::new(3.0, 4.0));
        assert!((body_energy(&b, WORLD) - 25.0).abs() < 1e-4);

        // 2 m above the floor, at rest: m·g·h = 40
        let b = body_at(3.5, Vec2::ZERO);
        assert!((body_energy(&b, WORLD) - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_baseline_progression() {
        let mut monitor = EnergyMonitor::new();
        let bodies = vec![body_at(3.5, Vec2::ZERO)];

        let first = monitor.update(&bodies, WORLD).unwrap();
        assert_eq!(first.previous, None);
        assert_eq!(first.drift(), None);

        let second = monitor.update(&bodies, WORLD).unwrap();
        assert_eq!(second.previous, Some(first.total));
        assert_eq!(second.drift(), Some(0.0));

        monitor.reset();
        assert_eq!(monitor.baseline(), None);
    }

    #[test]
    fn test_empty_list_keeps_baseline() {
        let mut monitor = EnergyMonitor::new();
        monitor.update(&[body_at(3.5, Vec2::ZERO)], WORLD);
        assert!(monitor.update(&[], WORLD).is_none());
        assert!(monitor.baseline().is_some());
    }

    #[test]
    fn test_drift_needs_baseline() {
        let tiny = EnergySnapshot {
            total: 1.0,
            previous: Some(0.005),
        };
        assert_eq!(tiny.drift(), None);

        let snap = EnergySnapshot {
            total: 110.0,
            previous: Some(100.0),
        };
        assert!((snap.drift().unwrap() - 10.0).abs() < 1e-4);
    }
}
