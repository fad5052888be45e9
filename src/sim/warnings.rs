//! Advisory warnings
//!
//! Warnings are recomputed from scratch every frame; nothing is cached.

use serde::Serialize;

use crate::consts::{ENERGY_DRIFT_THRESHOLD_PCT, MANY_BODIES_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningId {
    #[serde(rename = "many-bodies")]
    ManyBodies,
    #[serde(rename = "energy-drift")]
    EnergyDrift,
}

impl WarningId {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningId::ManyBodies => "many-bodies",
            WarningId::EnergyDrift => "energy-drift",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    pub id: WarningId,
    pub message: String,
    pub severity: Severity,
}

/// Warnings for the current body count and energy drift (percent).
///
/// `drift` is `None` when the energy baseline does not qualify.
pub fn derive_warnings(num_bodies: i32, drift: Option<f32>) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if num_bodies > MANY_BODIES_THRESHOLD {
        warnings.push(Warning {
            id: WarningId::ManyBodies,
            message: format!(
                "Large number of bodies ({}) may cause numerical instability",
                num_bodies
            ),
            severity: Severity::Warning,
        });
    }

    if let Some(drift) = drift.filter(|d| d.is_finite() && *d > ENERGY_DRIFT_THRESHOLD_PCT) {
        warnings.push(Warning {
            id: WarningId::EnergyDrift,
            message: format!("Energy not conserved ({:.1}% change)", drift),
            severity: Severity::Warning,
        });
    }

    warnings
}
