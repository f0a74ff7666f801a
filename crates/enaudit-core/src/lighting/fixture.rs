//! Lamp fixture types and the built-in catalog.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A lamp fixture model.
///
/// `cost_per_unit` is in the configured currency; no conversion happens
/// in the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampType {
    pub name: String,
    pub wattage_w: f64,
    /// Luminous output per fixture.
    pub lumens: f64,
    pub rated_life_hours: f64,
    pub cost_per_unit: f64,
}

impl LampType {
    /// Luminous efficacy in lumens per watt, derived from output and wattage.
    pub fn efficacy_lm_per_w(&self) -> f64 {
        if self.wattage_w > 0.0 {
            self.lumens / self.wattage_w
        } else {
            0.0
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.wattage_w > 0.0) || !self.wattage_w.is_finite() {
            return Err(CoreError::invalid_input(
                "lamp.wattage_w",
                format!("wattage must be positive, got {}", self.wattage_w),
            ));
        }
        if !(self.lumens > 0.0) || !self.lumens.is_finite() {
            return Err(CoreError::invalid_input(
                "lamp.lumens",
                format!("luminous output must be positive, got {}", self.lumens),
            ));
        }
        if self.cost_per_unit < 0.0 || !self.cost_per_unit.is_finite() {
            return Err(CoreError::invalid_input(
                "lamp.cost_per_unit",
                "unit cost must be non-negative",
            ));
        }
        Ok(())
    }
}

/// Common fixtures available without a custom definition.
pub fn builtin_catalog() -> Vec<LampType> {
    vec![
        LampType {
            name: "LED panel 36W".into(),
            wattage_w: 36.0,
            lumens: 3600.0,
            rated_life_hours: 50_000.0,
            cost_per_unit: 1_450.0,
        },
        LampType {
            name: "LED tube T8 18W".into(),
            wattage_w: 18.0,
            lumens: 1_850.0,
            rated_life_hours: 30_000.0,
            cost_per_unit: 320.0,
        },
        LampType {
            name: "Fluorescent T8 36W".into(),
            wattage_w: 36.0,
            lumens: 2_500.0,
            rated_life_hours: 12_000.0,
            cost_per_unit: 180.0,
        },
        LampType {
            name: "CFL 18W".into(),
            wattage_w: 18.0,
            lumens: 1_150.0,
            rated_life_hours: 8_000.0,
            cost_per_unit: 150.0,
        },
    ]
}

/// Case-insensitive catalog lookup by fixture name.
pub fn find_catalog_lamp(name: &str) -> Option<LampType> {
    builtin_catalog()
        .into_iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
}
