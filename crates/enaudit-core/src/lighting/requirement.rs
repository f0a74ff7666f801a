//! Per-room-kind illuminance requirements.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::building::RoomKind;
use crate::error::{CoreError, Result};

/// Required illuminance for a room kind, with its textual source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IlluminationRequirement {
    pub required_lux: f64,
    /// Where the figure comes from (standard and table/section).
    pub reference: String,
}

impl IlluminationRequirement {
    pub fn new(required_lux: f64, reference: impl Into<String>) -> Self {
        Self {
            required_lux,
            reference: reference.into(),
        }
    }
}

/// Lookup table keyed by room kind.
///
/// `default()` seeds typical PEC/IES maintained-illuminance levels; an
/// audit can override entries or start from `empty()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementTable {
    entries: HashMap<RoomKind, IlluminationRequirement>,
}

impl Default for RequirementTable {
    fn default() -> Self {
        let mut entries = HashMap::new();
        let mut seed = |kind: RoomKind, lux: f64| {
            entries.insert(
                kind,
                IlluminationRequirement::new(lux, "PEC Rule 5.1 / IES recommended levels"),
            );
        };
        seed(RoomKind::Office, 500.0);
        seed(RoomKind::Classroom, 300.0);
        seed(RoomKind::ConferenceRoom, 300.0);
        seed(RoomKind::Corridor, 100.0);
        seed(RoomKind::Laboratory, 500.0);
        seed(RoomKind::Lobby, 100.0);
        seed(RoomKind::Stairway, 100.0);
        seed(RoomKind::Storage, 100.0);
        seed(RoomKind::Toilet, 100.0);
        seed(RoomKind::Workshop, 300.0);
        Self { entries }
    }
}

impl RequirementTable {
    /// A table with no entries; every lookup fails until `set` is called.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn set(&mut self, kind: RoomKind, requirement: IlluminationRequirement) {
        self.entries.insert(kind, requirement);
    }

    pub fn get(&self, kind: RoomKind) -> Option<&IlluminationRequirement> {
        self.entries.get(&kind)
    }

    /// Requirement for a room kind, or `MissingLookup` when none is
    /// registered. Callers supply a fallback or surface the error.
    pub fn lookup(&self, kind: RoomKind) -> Result<&IlluminationRequirement> {
        self.entries.get(&kind).ok_or(CoreError::MissingLookup {
            room_kind: kind.as_str().to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomKind, &IlluminationRequirement)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}
