//! Lighting design: illuminance requirements, lamp fixtures, and the
//! illumination calculator.

pub mod calculator;
pub mod fixture;
pub mod requirement;

pub use calculator::{
    compute_illumination, room_cavity_ratio, utilization_factor, IlluminationResult,
    LightingDefaults,
};
pub use fixture::{builtin_catalog, find_catalog_lamp, LampType};
pub use requirement::{IlluminationRequirement, RequirementTable};
