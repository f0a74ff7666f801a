use clap::Subcommand;
use std::path::PathBuf;

use enaudit_core::{aggregate_schedule, Config, LoadItemDraft, PanelParams};

#[derive(Subcommand)]
pub enum LoadAction {
    /// Compute a panel load schedule
    Compute {
        /// Panel name
        #[arg(long, default_value = "LP-1")]
        panel: String,
        /// Load item spec "description:quantity:watts:demand_factor",
        /// repeatable
        #[arg(long = "item")]
        items: Vec<String>,
        /// JSON file with an array of load item drafts
        #[arg(long)]
        file: Option<PathBuf>,
        /// Panel voltage (defaults to the configured value)
        #[arg(long)]
        voltage: Option<f64>,
        /// Panel power factor (defaults to the configured value)
        #[arg(long)]
        power_factor: Option<f64>,
    },
}

/// Parse "description:quantity:watts:demand_factor".
fn parse_item_spec(spec: &str) -> Result<LoadItemDraft, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "expected description:quantity:watts:demand_factor, got '{spec}'"
        ));
    }
    let quantity: f64 = parts[1]
        .parse()
        .map_err(|_| format!("bad quantity in '{spec}'"))?;
    let rating_w: f64 = parts[2]
        .parse()
        .map_err(|_| format!("bad wattage in '{spec}'"))?;
    let demand_factor: f64 = parts[3]
        .parse()
        .map_err(|_| format!("bad demand factor in '{spec}'"))?;
    Ok(LoadItemDraft::new(parts[0], quantity, rating_w, demand_factor))
}

pub fn run(action: LoadAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        LoadAction::Compute {
            panel,
            items,
            file,
            voltage,
            power_factor,
        } => {
            let mut drafts: Vec<LoadItemDraft> = Vec::new();
            if let Some(path) = file {
                let content = std::fs::read_to_string(path)?;
                drafts.extend(serde_json::from_str::<Vec<LoadItemDraft>>(&content)?);
            }
            for spec in &items {
                drafts.push(parse_item_spec(spec)?);
            }
            if drafts.is_empty() {
                return Err("no load items given (use --item or --file)".into());
            }

            let config = Config::load()?;
            let params = PanelParams::new(
                panel,
                voltage.unwrap_or(config.electrical.voltage_v),
                power_factor.unwrap_or(config.electrical.power_factor),
            );
            let schedule = aggregate_schedule(&drafts, &params)?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
        }
    }
    Ok(())
}
