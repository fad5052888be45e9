//! Guided experiment presets
//!
//! Each experiment is a partial parameter patch plus a short prompt. The
//! host applies one through `SimulationContext::apply_experiment`.

use serde::Serialize;

use crate::params::ParamsPatch;

/// A named parameter preset
#[derive(Debug, Clone, Serialize)]
pub struct Experiment {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub patch: ParamsPatch,
}

/// Built-in experiments, in display order
pub fn builtin() -> Vec<Experiment> {
    vec![
        Experiment {
            id: "elastic",
            title: "Perfectly Elastic",
            description: "Restitution 1 and no friction: bounces should keep their height.",
            patch: ParamsPatch {
                restitution: Some(1.0),
                friction_mu: Some(0.0),
                energy_dissipation: Some(false),
                ..Default::default()
            },
        },
        Experiment {
            id: "inelastic",
            title: "Dead Ball",
            description: "Low restitution: watch the energy drain on every floor contact.",
            patch: ParamsPatch {
                restitution: Some(0.3),
                friction_mu: Some(0.4),
                ..Default::default()
            },
        },
        Experiment {
            id: "damping",
            title: "Air Resistance",
            description: "Per-frame damping removes energy even between collisions.",
            patch: ParamsPatch {
                energy_dissipation: Some(true),
                damping_coefficient: Some(0.98),
                ..Default::default()
            },
        },
        Experiment {
            id: "zero-g",
            title: "Zero Gravity",
            description: "Without gravity bodies keep drifting from their spawn point.",
            patch: ParamsPatch {
                gravity: Some(0.0),
                restitution: Some(1.0),
                friction_mu: Some(0.0),
                ..Default::default()
            },
        },
        Experiment {
            id: "replay",
            title: "Reproducible Layout",
            description: "Deterministic mode with a fixed seed: every reset gives the same layout.",
            patch: ParamsPatch {
                deterministic: Some(true),
                random_seed: Some(42),
                ..Default::default()
            },
        },
        Experiment {
            id: "crowd",
            title: "Crowd",
            description: "Many bodies at once; the stability warning should appear.",
            patch: ParamsPatch {
                num_bodies: Some(60),
                size: Some(0.2),
                ..Default::default()
            },
        },
    ]
}

/// Look up a built-in experiment by id
pub fn find(id: &str) -> Option<Experiment> {
    builtin().into_iter().find(|e| e.id == id)
}
