//! Building data store.
//!
//! An in-memory structure mapping floors to rooms and rooms to computed
//! metric snapshots. Calculations never mutate the store themselves; the
//! store caches their immutable results and replaces them wholesale on
//! recompute.

mod room;

pub use room::{Reflectances, Room, RoomKind};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::lighting::{
    compute_illumination, IlluminationResult, LampType, LightingDefaults, RequirementTable,
};
use crate::loads::LoadSchedule;

/// A floor and the rooms on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: Uuid,
    /// Floor level (ground = 0, basements negative).
    pub level: i32,
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

/// A building: ordered floors, each holding its rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Building {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            floors: Vec::new(),
        }
    }

    /// Add a floor and return its id.
    pub fn add_floor(&mut self, level: i32, name: impl Into<String>) -> Uuid {
        let floor = Floor {
            id: Uuid::new_v4(),
            level,
            name: name.into(),
            rooms: Vec::new(),
        };
        let id = floor.id;
        self.floors.push(floor);
        self.floors.sort_by_key(|f| f.level);
        id
    }

    pub fn floor(&self, id: Uuid) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floor_by_level(&self, level: i32) -> Option<&Floor> {
        self.floors.iter().find(|f| f.level == level)
    }

    /// Attach a room to the given floor. The room's `floor_id` is
    /// rewritten to match. Returns the room id.
    pub fn add_room(&mut self, floor_id: Uuid, mut room: Room) -> Result<Uuid> {
        let floor = self
            .floors
            .iter_mut()
            .find(|f| f.id == floor_id)
            .ok_or(CoreError::UnknownId {
                entity: "floor",
                id: floor_id.to_string(),
            })?;
        room.floor_id = floor_id;
        let id = room.id;
        floor.rooms.push(room);
        Ok(id)
    }

    pub fn room(&self, id: Uuid) -> Option<&Room> {
        self.floors.iter().flat_map(|f| &f.rooms).find(|r| r.id == id)
    }

    pub fn room_mut(&mut self, id: Uuid) -> Option<&mut Room> {
        self.floors
            .iter_mut()
            .flat_map(|f| &mut f.rooms)
            .find(|r| r.id == id)
    }

    pub fn remove_room(&mut self, id: Uuid) -> Option<Room> {
        for floor in &mut self.floors {
            if let Some(pos) = floor.rooms.iter().position(|r| r.id == id) {
                return Some(floor.rooms.remove(pos));
            }
        }
        None
    }

    /// All rooms across all floors, in floor order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.floors.iter().flat_map(|f| &f.rooms)
    }

    pub fn room_count(&self) -> usize {
        self.floors.iter().map(|f| f.rooms.len()).sum()
    }
}

/// Computed metrics cached per room. Replaced wholesale when any input
/// changes; individual fields are never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMetrics {
    #[serde(default)]
    pub illumination: Option<IlluminationResult>,
    #[serde(default)]
    pub load_schedules: Vec<LoadSchedule>,
    pub computed_at: DateTime<Utc>,
}

impl RoomMetrics {
    fn empty() -> Self {
        Self {
            illumination: None,
            load_schedules: Vec::new(),
            computed_at: Utc::now(),
        }
    }
}

/// Building model plus cached per-room metric snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingStore {
    pub building: Building,
    #[serde(default)]
    metrics: HashMap<Uuid, RoomMetrics>,
}

impl BuildingStore {
    pub fn new(building: Building) -> Self {
        Self {
            building,
            metrics: HashMap::new(),
        }
    }

    pub fn metrics(&self, room_id: Uuid) -> Option<&RoomMetrics> {
        self.metrics.get(&room_id)
    }

    /// Replace the cached illumination snapshot for a room.
    pub fn set_illumination(&mut self, room_id: Uuid, result: IlluminationResult) {
        let entry = self.metrics.entry(room_id).or_insert_with(RoomMetrics::empty);
        entry.illumination = Some(result);
        entry.computed_at = Utc::now();
    }

    /// Append a load schedule to a room's cached metrics.
    pub fn add_load_schedule(&mut self, room_id: Uuid, schedule: LoadSchedule) {
        let entry = self.metrics.entry(room_id).or_insert_with(RoomMetrics::empty);
        entry.load_schedules.push(schedule);
        entry.computed_at = Utc::now();
    }

    /// Drop all cached metrics for a room, e.g. after its geometry changed.
    pub fn clear_metrics(&mut self, room_id: Uuid) {
        self.metrics.remove(&room_id);
    }

    /// Look up the room's illuminance requirement, run the illumination
    /// calculator and cache the snapshot. Returns the computed result.
    pub fn compute_room_illumination(
        &mut self,
        room_id: Uuid,
        lamp: &LampType,
        table: &RequirementTable,
        defaults: &LightingDefaults,
    ) -> Result<IlluminationResult> {
        let room = self.building.room(room_id).ok_or(CoreError::UnknownId {
            entity: "room",
            id: room_id.to_string(),
        })?;
        let requirement = table.lookup(room.kind)?;
        let result = compute_illumination(room, lamp, requirement, defaults)?;
        self.set_illumination(room_id, result.clone());
        Ok(result)
    }
}
