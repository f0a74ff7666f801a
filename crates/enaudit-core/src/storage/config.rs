//! TOML-based application configuration.
//!
//! Holds the documented calculation defaults:
//! - Assumed surface reflectances and maintenance factor
//! - Working plane height
//! - Operating hours and the energy tariff for cost projections
//! - Default panel voltage and power factor
//!
//! Configuration is stored at `~/.config/enaudit/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::building::Reflectances;
use crate::error::ConfigError;
use crate::lighting::LightingDefaults;

/// Lighting calculation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingConfig {
    #[serde(default = "default_ceiling_reflectance")]
    pub ceiling_reflectance: f64,
    #[serde(default = "default_wall_reflectance")]
    pub wall_reflectance: f64,
    #[serde(default = "default_floor_reflectance")]
    pub floor_reflectance: f64,
    #[serde(default = "default_maintenance_factor")]
    pub maintenance_factor: f64,
    #[serde(default = "default_work_plane_m")]
    pub work_plane_m: f64,
}

/// Energy projection defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyConfig {
    #[serde(default = "default_operating_hours")]
    pub operating_hours_per_day: f64,
    #[serde(default = "default_days_per_month")]
    pub days_per_month: f64,
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
    /// Tariff per kWh in the local currency.
    #[serde(default = "default_tariff")]
    pub tariff_per_kwh: f64,
}

/// Panel electrical defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricalConfig {
    #[serde(default = "default_voltage")]
    pub voltage_v: f64,
    #[serde(default = "default_power_factor")]
    pub power_factor: f64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/enaudit/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub lighting: LightingConfig,
    #[serde(default)]
    pub energy: EnergyConfig,
    #[serde(default)]
    pub electrical: ElectricalConfig,
}

// Default functions
fn default_ceiling_reflectance() -> f64 {
    0.80
}
fn default_wall_reflectance() -> f64 {
    0.50
}
fn default_floor_reflectance() -> f64 {
    0.20
}
fn default_maintenance_factor() -> f64 {
    0.8
}
fn default_work_plane_m() -> f64 {
    0.85
}
fn default_operating_hours() -> f64 {
    8.0
}
fn default_days_per_month() -> f64 {
    30.0
}
fn default_days_per_year() -> f64 {
    365.0
}
fn default_tariff() -> f64 {
    12.0
}
fn default_voltage() -> f64 {
    230.0
}
fn default_power_factor() -> f64 {
    0.90
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ceiling_reflectance: default_ceiling_reflectance(),
            wall_reflectance: default_wall_reflectance(),
            floor_reflectance: default_floor_reflectance(),
            maintenance_factor: default_maintenance_factor(),
            work_plane_m: default_work_plane_m(),
        }
    }
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            operating_hours_per_day: default_operating_hours(),
            days_per_month: default_days_per_month(),
            days_per_year: default_days_per_year(),
            tariff_per_kwh: default_tariff(),
        }
    }
}

impl Default for ElectricalConfig {
    fn default() -> Self {
        Self {
            voltage_v: default_voltage(),
            power_factor: default_power_factor(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lighting: LightingConfig::default(),
            energy: EnergyConfig::default(),
            electrical: ElectricalConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() {
            return Err(invalid("config key is empty".into()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current
                    .as_object_mut()
                    .ok_or_else(|| invalid("unknown config key".into()))?;
                let existing = obj
                    .get(part)
                    .ok_or_else(|| invalid("unknown config key".into()))?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<f64>()
                            .map_err(|e| invalid(e.to_string()))?;
                        serde_json::Number::from_f64(n)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| {
                                invalid(format!("cannot parse '{value}' as number"))
                            })?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current
                .get_mut(part)
                .ok_or_else(|| invalid("unknown config key".into()))?;
        }

        Err(invalid("unknown config key".into()))
    }

    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/enaudit"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, or return the defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        Some(match val {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Set a config value by dot-separated key and persist it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }

    /// View of the lighting/energy sections as calculator defaults.
    pub fn lighting_defaults(&self) -> LightingDefaults {
        LightingDefaults {
            reflectances: Reflectances {
                ceiling: self.lighting.ceiling_reflectance,
                walls: self.lighting.wall_reflectance,
                floor: self.lighting.floor_reflectance,
            },
            maintenance_factor: self.lighting.maintenance_factor,
            work_plane_m: self.lighting.work_plane_m,
            operating_hours_per_day: self.energy.operating_hours_per_day,
            days_per_month: self.energy.days_per_month,
            days_per_year: self.energy.days_per_year,
            tariff_per_kwh: self.energy.tariff_per_kwh,
        }
    }
}
