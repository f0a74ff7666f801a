//! Load schedule aggregation.
//!
//! A pure function over an ordered list of load item drafts plus panel
//! electrical parameters. Totals are exact sums; recomputing from the same
//! drafts yields an identical schedule (no accumulation across calls).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Standard breaker frame sizes in amperes.
const STANDARD_BREAKERS_A: [u32; 19] = [
    15, 20, 30, 40, 50, 60, 70, 80, 90, 100, 125, 150, 175, 200, 225, 250, 300, 350, 400,
];

/// THHN copper conductor sizes (mm²) and ampacities at 75°C.
const CONDUCTOR_AMPACITY: [(f64, f64); 9] = [
    (2.0, 27.0),
    (3.5, 36.0),
    (5.5, 48.0),
    (8.0, 65.0),
    (14.0, 95.0),
    (22.0, 125.0),
    (30.0, 150.0),
    (38.0, 175.0),
    (50.0, 215.0),
];

/// An appliance or circuit as entered by the auditor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItemDraft {
    pub description: String,
    pub quantity: f64,
    /// Unit rating in watts.
    pub rating_w: f64,
    /// Fraction of the connected load expected to draw simultaneously,
    /// in `[0, 1]`.
    pub demand_factor: f64,
}

impl LoadItemDraft {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        rating_w: f64,
        demand_factor: f64,
    ) -> Self {
        Self {
            description: description.into(),
            quantity,
            rating_w,
            demand_factor,
        }
    }
}

/// A computed schedule line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadItem {
    pub description: String,
    pub quantity: f64,
    pub rating_w: f64,
    pub demand_factor: f64,
    pub connected_load_w: f64,
    pub demand_load_w: f64,
    /// Single-phase: equals the connected load. `None` when no voltage
    /// was given.
    pub volt_amperes: Option<f64>,
    pub current_a: Option<f64>,
    /// Next standard breaker at or above 125% of the item current.
    pub breaker_a: Option<u32>,
    /// Smallest THHN size whose ampacity covers the breaker.
    pub conductor_mm2: Option<f64>,
}

/// Panel-level electrical parameters for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelParams {
    pub panel_name: String,
    pub title: String,
    #[serde(default)]
    pub room_id: Option<Uuid>,
    pub voltage_v: f64,
    pub power_factor: f64,
}

impl PanelParams {
    pub fn new(panel_name: impl Into<String>, voltage_v: f64, power_factor: f64) -> Self {
        let panel_name = panel_name.into();
        Self {
            title: format!("Schedule of loads - {panel_name}"),
            panel_name,
            room_id: None,
            voltage_v,
            power_factor,
        }
    }
}

/// Incoming feeder sizing for a panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederSpec {
    pub conductor_mm2: f64,
    pub protection_a: u32,
}

/// A populated panel schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSchedule {
    pub panel_id: Uuid,
    pub panel_name: String,
    #[serde(default)]
    pub room_id: Option<Uuid>,
    pub title: String,
    pub items: Vec<LoadItem>,
    pub total_connected_load_w: f64,
    pub total_demand_load_w: f64,
    pub voltage_v: f64,
    pub power_factor: f64,
    /// `total_demand_load_w / (V * pf)` when both are positive.
    pub current_a: Option<f64>,
    #[serde(default)]
    pub feeder: Option<FeederSpec>,
}

fn next_breaker(current_a: f64) -> Option<u32> {
    let target = current_a * 1.25;
    STANDARD_BREAKERS_A
        .iter()
        .copied()
        .find(|&b| b as f64 >= target)
}

fn conductor_for(ampacity_needed: f64) -> Option<f64> {
    CONDUCTOR_AMPACITY
        .iter()
        .find(|(_, amps)| *amps >= ampacity_needed)
        .map(|(mm2, _)| *mm2)
}

fn validate_draft(index: usize, draft: &LoadItemDraft) -> Result<()> {
    let field = |name: &str| format!("items[{index}].{name}");
    if draft.quantity < 0.0 || !draft.quantity.is_finite() {
        return Err(CoreError::invalid_input(
            &field("quantity"),
            format!("quantity must be non-negative, got {}", draft.quantity),
        ));
    }
    if draft.rating_w < 0.0 || !draft.rating_w.is_finite() {
        return Err(CoreError::invalid_input(
            &field("rating_w"),
            format!("rating must be non-negative, got {}", draft.rating_w),
        ));
    }
    if !(0.0..=1.0).contains(&draft.demand_factor) {
        return Err(CoreError::invalid_input(
            &field("demand_factor"),
            format!("demand factor must be in [0, 1], got {}", draft.demand_factor),
        ));
    }
    Ok(())
}

fn compute_item(draft: &LoadItemDraft, voltage_v: f64) -> LoadItem {
    let connected_load_w = draft.quantity * draft.rating_w;
    let demand_load_w = connected_load_w * draft.demand_factor;
    let (volt_amperes, current_a, breaker_a, conductor_mm2) = if voltage_v > 0.0 {
        let va = connected_load_w;
        let current = va / voltage_v;
        let breaker = next_breaker(current);
        let conductor = conductor_for(breaker.map(|b| b as f64).unwrap_or(current * 1.25));
        (Some(va), Some(current), breaker, conductor)
    } else {
        (None, None, None, None)
    };
    LoadItem {
        description: draft.description.clone(),
        quantity: draft.quantity,
        rating_w: draft.rating_w,
        demand_factor: draft.demand_factor,
        connected_load_w,
        demand_load_w,
        volt_amperes,
        current_a,
        breaker_a,
        conductor_mm2,
    }
}

/// Aggregate an ordered list of drafts into a [`LoadSchedule`].
///
/// # Errors
///
/// `InvalidInput` when any item has a negative quantity or rating, a
/// demand factor outside `[0, 1]`, or the panel voltage/power factor is
/// out of range.
pub fn aggregate_schedule(drafts: &[LoadItemDraft], params: &PanelParams) -> Result<LoadSchedule> {
    if params.voltage_v < 0.0 || !params.voltage_v.is_finite() {
        return Err(CoreError::invalid_input(
            "panel.voltage_v",
            format!("voltage must be non-negative, got {}", params.voltage_v),
        ));
    }
    if !(0.0..=1.0).contains(&params.power_factor) {
        return Err(CoreError::invalid_input(
            "panel.power_factor",
            format!("power factor must be in [0, 1], got {}", params.power_factor),
        ));
    }
    for (i, draft) in drafts.iter().enumerate() {
        validate_draft(i, draft)?;
    }

    let items: Vec<LoadItem> = drafts
        .iter()
        .map(|d| compute_item(d, params.voltage_v))
        .collect();
    let total_connected_load_w: f64 = items.iter().map(|i| i.connected_load_w).sum();
    let total_demand_load_w: f64 = items.iter().map(|i| i.demand_load_w).sum();

    let current_a = if params.voltage_v > 0.0 && params.power_factor > 0.0 {
        Some(total_demand_load_w / (params.voltage_v * params.power_factor))
    } else {
        None
    };
    let feeder = current_a.and_then(|amps| {
        let protection_a = next_breaker(amps)?;
        let conductor_mm2 = conductor_for(protection_a as f64)?;
        Some(FeederSpec {
            conductor_mm2,
            protection_a,
        })
    });

    Ok(LoadSchedule {
        panel_id: Uuid::new_v4(),
        panel_name: params.panel_name.clone(),
        room_id: params.room_id,
        title: params.title.clone(),
        items,
        total_connected_load_w,
        total_demand_load_w,
        voltage_v: params.voltage_v,
        power_factor: params.power_factor,
        current_a,
        feeder,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_drafts() -> Vec<LoadItemDraft> {
        vec![
            LoadItemDraft::new("Lighting outlets", 10.0, 100.0, 1.0),
            LoadItemDraft::new("Air conditioner", 1.0, 5000.0, 0.8),
        ]
    }

    #[test]
    fn test_worked_scenario_totals() {
        let schedule =
            aggregate_schedule(&sample_drafts(), &PanelParams::new("LP-1", 230.0, 0.9)).unwrap();
        assert_eq!(schedule.total_connected_load_w, 6000.0);
        assert_eq!(schedule.total_demand_load_w, 5000.0);
    }

    #[test]
    fn test_worked_scenario_panel_current() {
        let schedule =
            aggregate_schedule(&sample_drafts(), &PanelParams::new("LP-1", 230.0, 0.9)).unwrap();
        let amps = schedule.current_a.unwrap();
        assert!((amps - 5000.0 / (230.0 * 0.9)).abs() < 1e-9);
        assert!((amps - 24.15).abs() < 0.01);
    }

    #[test]
    fn test_totals_are_exact_item_sums() {
        let schedule =
            aggregate_schedule(&sample_drafts(), &PanelParams::new("LP-1", 230.0, 0.9)).unwrap();
        let connected: f64 = schedule.items.iter().map(|i| i.connected_load_w).sum();
        let demand: f64 = schedule.items.iter().map(|i| i.demand_load_w).sum();
        assert_eq!(schedule.total_connected_load_w, connected);
        assert_eq!(schedule.total_demand_load_w, demand);
    }

    #[test]
    fn test_item_current_and_sizing() {
        let schedule =
            aggregate_schedule(&sample_drafts(), &PanelParams::new("LP-1", 230.0, 0.9)).unwrap();
        let aircon = &schedule.items[1];
        assert_eq!(aircon.volt_amperes, Some(5000.0));
        let amps = aircon.current_a.unwrap();
        assert!((amps - 5000.0 / 230.0).abs() < 1e-9);
        // 21.7 A * 1.25 = 27.2 -> 30 A breaker, 3.5 mm² THHN.
        assert_eq!(aircon.breaker_a, Some(30));
        assert_eq!(aircon.conductor_mm2, Some(3.5));
    }

    #[test]
    fn test_no_voltage_leaves_current_undefined() {
        let schedule =
            aggregate_schedule(&sample_drafts(), &PanelParams::new("LP-1", 0.0, 0.9)).unwrap();
        assert!(schedule.current_a.is_none());
        assert!(schedule.feeder.is_none());
        assert!(schedule.items.iter().all(|i| i.current_a.is_none()));
        // Totals are still computed.
        assert_eq!(schedule.total_connected_load_w, 6000.0);
    }

    #[test]
    fn test_invalid_items_rejected() {
        let params = PanelParams::new("LP-1", 230.0, 0.9);
        let negative_qty = vec![LoadItemDraft::new("x", -1.0, 100.0, 1.0)];
        assert!(matches!(
            aggregate_schedule(&negative_qty, &params),
            Err(CoreError::InvalidInput { .. })
        ));

        let negative_rating = vec![LoadItemDraft::new("x", 1.0, -100.0, 1.0)];
        assert!(aggregate_schedule(&negative_rating, &params).is_err());

        let bad_df = vec![LoadItemDraft::new("x", 1.0, 100.0, 1.2)];
        let err = aggregate_schedule(&bad_df, &params).unwrap_err();
        assert!(err.to_string().contains("demand factor"));
    }

    #[test]
    fn test_invalid_panel_params_rejected() {
        let drafts = sample_drafts();
        assert!(aggregate_schedule(&drafts, &PanelParams::new("LP-1", -230.0, 0.9)).is_err());
        assert!(aggregate_schedule(&drafts, &PanelParams::new("LP-1", 230.0, 1.5)).is_err());
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = aggregate_schedule(&[], &PanelParams::new("LP-1", 230.0, 0.9)).unwrap();
        assert_eq!(schedule.total_connected_load_w, 0.0);
        assert_eq!(schedule.total_demand_load_w, 0.0);
        assert_eq!(schedule.current_a, Some(0.0));
    }

    #[test]
    fn test_idempotent_recompute() {
        let drafts = sample_drafts();
        let params = PanelParams::new("LP-1", 230.0, 0.9);
        let a = aggregate_schedule(&drafts, &params).unwrap();
        let b = aggregate_schedule(&drafts, &params).unwrap();
        // Panel ids differ per invocation; everything computed is equal.
        assert_eq!(a.items, b.items);
        assert_eq!(a.total_connected_load_w, b.total_connected_load_w);
        assert_eq!(a.total_demand_load_w, b.total_demand_load_w);
        assert_eq!(a.current_a, b.current_a);
        assert_eq!(a.feeder, b.feeder);
    }

    #[test]
    fn test_breaker_ladder() {
        assert_eq!(next_breaker(10.0), Some(15));
        assert_eq!(next_breaker(12.5), Some(20));
        assert_eq!(next_breaker(100.0), Some(125));
        assert_eq!(next_breaker(1000.0), None);
    }
}
