use clap::Subcommand;
use uuid::Uuid;

use enaudit_core::{
    builtin_catalog, compute_illumination, find_catalog_lamp, Config, IlluminationRequirement,
    LampType, RequirementTable, Room, RoomKind,
};

#[derive(Subcommand)]
pub enum IlluminationAction {
    /// Compute an illumination design for room dimensions
    Compute {
        /// Room length in meters
        #[arg(long)]
        length: f64,
        /// Room width in meters
        #[arg(long)]
        width: f64,
        /// Room height in meters
        #[arg(long)]
        height: f64,
        /// Room kind (e.g. "office", "classroom")
        #[arg(long, default_value = "office")]
        kind: String,
        /// Catalog fixture name (see `illumination catalog`)
        #[arg(long, default_value = "LED panel 36W")]
        lamp: String,
        /// Override the required lux instead of the requirement table
        #[arg(long)]
        lux: Option<f64>,
        /// Custom lamp wattage (requires --lamp-lumens)
        #[arg(long, requires = "lamp_lumens")]
        lamp_watts: Option<f64>,
        /// Custom lamp luminous output
        #[arg(long, requires = "lamp_watts")]
        lamp_lumens: Option<f64>,
        /// Custom lamp unit cost
        #[arg(long, default_value = "0")]
        lamp_cost: f64,
    },
    /// List the illuminance requirement table
    Requirements,
    /// List the built-in fixture catalog
    Catalog,
}

pub fn run(action: IlluminationAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        IlluminationAction::Compute {
            length,
            width,
            height,
            kind,
            lamp,
            lux,
            lamp_watts,
            lamp_lumens,
            lamp_cost,
        } => {
            let kind: RoomKind = kind.parse()?;
            let room = Room::new(Uuid::nil(), "ad-hoc", kind, length, width, height);

            let lamp = match (lamp_watts, lamp_lumens) {
                (Some(wattage_w), Some(lumens)) => LampType {
                    name: "custom".into(),
                    wattage_w,
                    lumens,
                    rated_life_hours: 0.0,
                    cost_per_unit: lamp_cost,
                },
                _ => find_catalog_lamp(&lamp)
                    .ok_or_else(|| format!("unknown catalog fixture: {lamp}"))?,
            };

            let table = RequirementTable::default();
            let requirement = match lux {
                Some(lux) => IlluminationRequirement::new(lux, "manual override"),
                None => table.lookup(kind)?.clone(),
            };

            let defaults = Config::load()?.lighting_defaults();
            let result = compute_illumination(&room, &lamp, &requirement, &defaults)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        IlluminationAction::Requirements => {
            let table = RequirementTable::default();
            let mut rows: Vec<_> = table.iter().collect();
            rows.sort_by_key(|(kind, _)| kind.as_str());
            for (kind, req) in rows {
                println!("{:<16} {:>6.0} lux  ({})", kind, req.required_lux, req.reference);
            }
        }
        IlluminationAction::Catalog => {
            for lamp in builtin_catalog() {
                println!(
                    "{:<20} {:>5.0} W  {:>6.0} lm  {:>5.1} lm/W  {:>9.0} h  cost {:>8.2}",
                    lamp.name,
                    lamp.wattage_w,
                    lamp.lumens,
                    lamp.efficacy_lm_per_w(),
                    lamp.rated_life_hours,
                    lamp.cost_per_unit
                );
            }
        }
    }
    Ok(())
}
