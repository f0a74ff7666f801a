//! Illumination calculator.
//!
//! A pure function of (room, lamp, requirement, defaults). Produces an
//! immutable [`IlluminationResult`] snapshot; recompute wholesale when any
//! input changes.
//!
//! ## Method
//!
//! Zonal-cavity sizing:
//!
//! ```text
//! lumens_required = required_lux * area
//! RCR             = 5 * h_cavity * (L + W) / (L * W)
//! lamps           = lumens_required / (lamp_lumens * UF * LLF)
//! ```
//!
//! The utilization factor is interpolated from a coefficient-of-utilization
//! table for a generic lensed troffer at 0.80/0.50/0.20 reflectances and
//! scaled by the room's flux-weighted reflectance.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::building::{Reflectances, Room};
use crate::error::{CoreError, Result};
use crate::lighting::fixture::LampType;
use crate::lighting::requirement::IlluminationRequirement;

/// Documented calculation defaults, normally sourced from [`crate::Config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingDefaults {
    /// Assumed reflectances when the room does not specify its own.
    pub reflectances: Reflectances,
    /// Maintenance factor used as the light loss factor.
    pub maintenance_factor: f64,
    /// Working plane height above the floor, in meters.
    pub work_plane_m: f64,
    pub operating_hours_per_day: f64,
    pub days_per_month: f64,
    pub days_per_year: f64,
    /// Energy tariff per kWh, in the configured currency.
    pub tariff_per_kwh: f64,
}

impl Default for LightingDefaults {
    fn default() -> Self {
        Self {
            reflectances: Reflectances::default(),
            maintenance_factor: 0.8,
            work_plane_m: 0.85,
            operating_hours_per_day: 8.0,
            days_per_month: 30.0,
            days_per_year: 365.0,
            tariff_per_kwh: 12.0,
        }
    }
}

/// Immutable output snapshot of the illumination calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlluminationResult {
    pub room_id: Uuid,
    pub room_name: String,
    pub lamp_name: String,
    pub required_lux: f64,
    pub total_lumens_required: f64,
    pub room_cavity_ratio: f64,
    pub utilization_factor: f64,
    pub light_loss_factor: f64,
    /// Unrounded lamp count from the lumen method.
    pub theoretical_lamps: f64,
    /// `theoretical_lamps` rounded up; never under-provisions.
    pub actual_lamps: u32,
    pub lamps_along_length: u32,
    pub lamps_along_width: u32,
    pub spacing_length_m: f64,
    pub spacing_width_m: f64,
    pub total_wattage_w: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub annual_kwh: f64,
    pub annual_energy_cost: f64,
    /// Purchase cost of the fixtures alone.
    pub initial_investment: f64,
    /// W/m² over the floor area.
    pub power_density_w_m2: f64,
    /// Maintained illuminance delivered by the rounded lamp count.
    pub achieved_lux: f64,
}

/// Coefficient of utilization vs. RCR (0..=10) for a generic lensed
/// troffer at the reference reflectances 0.80/0.50/0.20.
const CU_TABLE: [f64; 11] = [
    0.87, 0.81, 0.75, 0.69, 0.64, 0.59, 0.55, 0.51, 0.47, 0.44, 0.41,
];

/// Flux weighting of the reference reflectances (0.80/0.50/0.20).
const REFERENCE_REFLECTANCE_WEIGHT: f64 = 0.59;

/// Room cavity ratio for a rectangular room.
///
/// `cavity_height_m` is the luminaire mounting height above the working
/// plane.
pub fn room_cavity_ratio(length_m: f64, width_m: f64, cavity_height_m: f64) -> f64 {
    if length_m <= 0.0 || width_m <= 0.0 {
        return 0.0;
    }
    5.0 * cavity_height_m.max(0.0) * (length_m + width_m) / (length_m * width_m)
}

/// Utilization factor from RCR and surface reflectances.
///
/// Linear interpolation over [`CU_TABLE`], scaled by the ratio of the
/// room's flux-weighted reflectance (ceiling 0.5, walls 0.3, floor 0.2)
/// to the reference weighting, clamped to `[0.05, 0.95]`.
pub fn utilization_factor(rcr: f64, reflectances: &Reflectances) -> f64 {
    let rcr = rcr.clamp(0.0, 10.0);
    let lo = rcr.floor() as usize;
    let hi = (lo + 1).min(CU_TABLE.len() - 1);
    let t = rcr - lo as f64;
    let base = CU_TABLE[lo] + (CU_TABLE[hi] - CU_TABLE[lo]) * t;

    let weighted =
        0.5 * reflectances.ceiling + 0.3 * reflectances.walls + 0.2 * reflectances.floor;
    (base * weighted / REFERENCE_REFLECTANCE_WEIGHT).clamp(0.05, 0.95)
}

fn validate_room(room: &Room) -> Result<()> {
    // Each dimension on its own: a negative pair multiplies to a
    // positive area, and a zero width with an area override would slip
    // past an area-only check.
    for (field, value) in [
        ("room.length_m", room.length_m),
        ("room.width_m", room.width_m),
        ("room.height_m", room.height_m),
    ] {
        if !(value > 0.0) || !value.is_finite() {
            return Err(CoreError::invalid_input(
                field,
                format!("dimension must be positive, got {value}"),
            ));
        }
    }
    if !(room.area_m2() > 0.0) || !room.area_m2().is_finite() {
        return Err(CoreError::invalid_input(
            "room.area_m2",
            format!("area must be positive, got {}", room.area_m2()),
        ));
    }
    if let Some(mf) = room.maintenance_factor {
        if !(mf > 0.0 && mf <= 1.0) {
            return Err(CoreError::invalid_input(
                "room.maintenance_factor",
                format!("maintenance factor must be in (0, 1], got {mf}"),
            ));
        }
    }
    if let Some(r) = &room.reflectances {
        for (field, value) in [
            ("room.reflectances.ceiling", r.ceiling),
            ("room.reflectances.walls", r.walls),
            ("room.reflectances.floor", r.floor),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::invalid_input(
                    field,
                    format!("reflectance must be in [0, 1], got {value}"),
                ));
            }
        }
    }
    Ok(())
}

/// Arrange `actual_lamps` across the floor proportionally to the room
/// aspect ratio. The returned counts always cover the lamp count.
fn lamp_layout(actual_lamps: u32, length_m: f64, width_m: f64) -> (u32, u32) {
    let n = actual_lamps.max(1) as f64;
    let along_length = (n * length_m / width_m).sqrt().ceil().max(1.0) as u32;
    let along_width = (n / along_length as f64).ceil().max(1.0) as u32;
    (along_length, along_width)
}

/// Compute an [`IlluminationResult`] for a room lit by the given lamp.
///
/// # Errors
///
/// `InvalidInput` when area or height is non-positive, the lamp has
/// non-positive lumens or wattage, the required lux is non-positive, or
/// an optional factor is out of range.
pub fn compute_illumination(
    room: &Room,
    lamp: &LampType,
    requirement: &IlluminationRequirement,
    defaults: &LightingDefaults,
) -> Result<IlluminationResult> {
    validate_room(room)?;
    lamp.validate()?;
    if !(requirement.required_lux > 0.0) || !requirement.required_lux.is_finite() {
        return Err(CoreError::invalid_input(
            "requirement.required_lux",
            format!(
                "required illuminance must be positive, got {}",
                requirement.required_lux
            ),
        ));
    }

    let area = room.area_m2();
    let total_lumens_required = requirement.required_lux * area;

    let work_plane = room.work_plane_m.unwrap_or(defaults.work_plane_m);
    let cavity_height = (room.height_m - work_plane).max(0.0);
    let rcr = room_cavity_ratio(room.length_m, room.width_m, cavity_height);

    let reflectances = room.reflectances.unwrap_or(defaults.reflectances);
    let uf = utilization_factor(rcr, &reflectances);
    let llf = room
        .maintenance_factor
        .unwrap_or(defaults.maintenance_factor);

    let theoretical_lamps = total_lumens_required / (lamp.lumens * uf * llf);
    let actual_lamps = theoretical_lamps.ceil().max(1.0) as u32;

    let (lamps_along_length, lamps_along_width) =
        lamp_layout(actual_lamps, room.length_m, room.width_m);
    let spacing_length_m = if lamps_along_length > 0 {
        room.length_m / lamps_along_length as f64
    } else {
        0.0
    };
    let spacing_width_m = if lamps_along_width > 0 {
        room.width_m / lamps_along_width as f64
    } else {
        0.0
    };

    let total_wattage_w = actual_lamps as f64 * lamp.wattage_w;
    let daily_kwh = total_wattage_w * defaults.operating_hours_per_day / 1000.0;
    let monthly_kwh = daily_kwh * defaults.days_per_month;
    let annual_kwh = daily_kwh * defaults.days_per_year;
    let annual_energy_cost = annual_kwh * defaults.tariff_per_kwh;
    let initial_investment = actual_lamps as f64 * lamp.cost_per_unit;
    let power_density_w_m2 = total_wattage_w / area;
    let achieved_lux = actual_lamps as f64 * lamp.lumens * uf * llf / area;

    Ok(IlluminationResult {
        room_id: room.id,
        room_name: room.name.clone(),
        lamp_name: lamp.name.clone(),
        required_lux: requirement.required_lux,
        total_lumens_required,
        room_cavity_ratio: rcr,
        utilization_factor: uf,
        light_loss_factor: llf,
        theoretical_lamps,
        actual_lamps,
        lamps_along_length,
        lamps_along_width,
        spacing_length_m,
        spacing_width_m,
        total_wattage_w,
        daily_kwh,
        monthly_kwh,
        annual_kwh,
        annual_energy_cost,
        initial_investment,
        power_density_w_m2,
        achieved_lux,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::building::RoomKind;
    use uuid::Uuid;

    fn room_5x4x3() -> Room {
        Room::new(Uuid::nil(), "Office 201", RoomKind::Office, 5.0, 4.0, 3.0)
    }

    fn lamp_4000lm_40w() -> LampType {
        LampType {
            name: "test 40W".into(),
            wattage_w: 40.0,
            lumens: 4000.0,
            rated_life_hours: 10_000.0,
            cost_per_unit: 200.0,
        }
    }

    #[test]
    fn test_lumens_required_is_lux_times_area() {
        let result = compute_illumination(
            &room_5x4x3(),
            &lamp_4000lm_40w(),
            &IlluminationRequirement::new(500.0, "test"),
            &LightingDefaults::default(),
        )
        .unwrap();
        assert_eq!(result.total_lumens_required, 10_000.0);
    }

    #[test]
    fn test_worked_scenario_with_explicit_factors() {
        // UF = 0.6, LLF = 0.8 -> 10000 / (4000 * 0.6 * 0.8) = 5.2 -> 6 lamps.
        let theoretical: f64 = 10_000.0 / (4000.0 * 0.6 * 0.8);
        assert!((theoretical - 5.208333).abs() < 1e-5);
        assert_eq!(theoretical.ceil() as u32, 6);
    }

    #[test]
    fn test_rounding_never_under_provisions() {
        let result = compute_illumination(
            &room_5x4x3(),
            &lamp_4000lm_40w(),
            &IlluminationRequirement::new(500.0, "test"),
            &LightingDefaults::default(),
        )
        .unwrap();
        assert!(result.actual_lamps as f64 >= result.theoretical_lamps);
        assert!(result.achieved_lux >= result.required_lux);
    }

    #[test]
    fn test_rcr_formula() {
        // 5 * 2.15 * (5 + 4) / 20 = 4.8375
        let rcr = room_cavity_ratio(5.0, 4.0, 2.15);
        assert!((rcr - 4.8375).abs() < 1e-9);
        assert_eq!(room_cavity_ratio(0.0, 4.0, 2.0), 0.0);
    }

    #[test]
    fn test_uf_decreases_with_rcr() {
        let refl = Reflectances::default();
        let mut prev = utilization_factor(0.0, &refl);
        for i in 1..=10 {
            let uf = utilization_factor(i as f64, &refl);
            assert!(uf < prev, "UF must fall as RCR rises");
            prev = uf;
        }
    }

    #[test]
    fn test_uf_at_reference_reflectances_matches_table() {
        let refl = Reflectances::default();
        assert!((utilization_factor(0.0, &refl) - 0.87).abs() < 1e-9);
        assert!((utilization_factor(5.0, &refl) - 0.59).abs() < 1e-9);
        // Darker surfaces lower the factor.
        let dark = Reflectances {
            ceiling: 0.5,
            walls: 0.3,
            floor: 0.1,
        };
        assert!(utilization_factor(5.0, &dark) < 0.59);
    }

    #[test]
    fn test_layout_covers_lamp_count() {
        for n in 1..=40u32 {
            let (a, b) = lamp_layout(n, 5.0, 4.0);
            assert!(a * b >= n, "layout {a}x{b} cannot hold {n} lamps");
        }
    }

    #[test]
    fn test_layout_follows_aspect_ratio() {
        // A long narrow room puts more lamps along its length.
        let (along_length, along_width) = lamp_layout(8, 12.0, 3.0);
        assert!(along_length > along_width);
    }

    #[test]
    fn test_energy_outputs_scale() {
        let defaults = LightingDefaults::default();
        let result = compute_illumination(
            &room_5x4x3(),
            &lamp_4000lm_40w(),
            &IlluminationRequirement::new(500.0, "test"),
            &defaults,
        )
        .unwrap();
        let expected_daily = result.total_wattage_w * defaults.operating_hours_per_day / 1000.0;
        assert!((result.daily_kwh - expected_daily).abs() < 1e-12);
        assert!((result.monthly_kwh - expected_daily * 30.0).abs() < 1e-9);
        assert!((result.annual_kwh - expected_daily * 365.0).abs() < 1e-9);
        assert!(
            (result.annual_energy_cost - result.annual_kwh * defaults.tariff_per_kwh).abs() < 1e-9
        );
        assert_eq!(
            result.initial_investment,
            result.actual_lamps as f64 * 200.0
        );
        assert!((result.power_density_w_m2 - result.total_wattage_w / 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let defaults = LightingDefaults::default();
        let req = IlluminationRequirement::new(500.0, "test");

        let mut flat = room_5x4x3();
        flat.height_m = 0.0;
        assert!(matches!(
            compute_illumination(&flat, &lamp_4000lm_40w(), &req, &defaults),
            Err(CoreError::InvalidInput { .. })
        ));

        let mut zero_area = room_5x4x3();
        zero_area.area_override_m2 = Some(0.0);
        assert!(compute_illumination(&zero_area, &lamp_4000lm_40w(), &req, &defaults).is_err());

        // Negative dimensions multiply to a positive area; they must
        // still be rejected, not produce negative spacings.
        let mut mirrored = room_5x4x3();
        mirrored.length_m = -5.0;
        mirrored.width_m = -4.0;
        assert!((mirrored.area_m2() - 20.0).abs() < 1e-12);
        assert!(matches!(
            compute_illumination(&mirrored, &lamp_4000lm_40w(), &req, &defaults),
            Err(CoreError::InvalidInput { .. })
        ));

        // A zero width with an area override must not reach the layout,
        // where it would divide by zero.
        let mut zero_width = room_5x4x3();
        zero_width.width_m = 0.0;
        zero_width.area_override_m2 = Some(20.0);
        assert!(compute_illumination(&zero_width, &lamp_4000lm_40w(), &req, &defaults).is_err());

        let mut dead_lamp = lamp_4000lm_40w();
        dead_lamp.lumens = 0.0;
        assert!(compute_illumination(&room_5x4x3(), &dead_lamp, &req, &defaults).is_err());

        let no_lux = IlluminationRequirement::new(0.0, "test");
        assert!(
            compute_illumination(&room_5x4x3(), &lamp_4000lm_40w(), &no_lux, &defaults).is_err()
        );

        let mut bad_mf = room_5x4x3();
        bad_mf.maintenance_factor = Some(1.5);
        assert!(compute_illumination(&bad_mf, &lamp_4000lm_40w(), &req, &defaults).is_err());
    }

    #[test]
    fn test_room_overrides_take_effect() {
        let defaults = LightingDefaults::default();
        let req = IlluminationRequirement::new(500.0, "test");
        let base = compute_illumination(&room_5x4x3(), &lamp_4000lm_40w(), &req, &defaults)
            .unwrap();

        let mut worn = room_5x4x3();
        worn.maintenance_factor = Some(0.6);
        let dirty = compute_illumination(&worn, &lamp_4000lm_40w(), &req, &defaults).unwrap();
        assert_eq!(dirty.light_loss_factor, 0.6);
        assert!(dirty.theoretical_lamps > base.theoretical_lamps);
    }

    #[test]
    fn test_deterministic() {
        let room = room_5x4x3();
        let lamp = lamp_4000lm_40w();
        let req = IlluminationRequirement::new(500.0, "test");
        let defaults = LightingDefaults::default();
        let a = compute_illumination(&room, &lamp, &req, &defaults).unwrap();
        let b = compute_illumination(&room, &lamp, &req, &defaults).unwrap();
        assert_eq!(a, b);
    }
}
