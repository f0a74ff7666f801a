//! Room model and classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Room classification. Lookup key for illuminance requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomKind {
    Office,
    Classroom,
    ConferenceRoom,
    Corridor,
    Laboratory,
    Lobby,
    Stairway,
    Storage,
    Toilet,
    Workshop,
}

impl RoomKind {
    pub const ALL: [RoomKind; 10] = [
        RoomKind::Office,
        RoomKind::Classroom,
        RoomKind::ConferenceRoom,
        RoomKind::Corridor,
        RoomKind::Laboratory,
        RoomKind::Lobby,
        RoomKind::Stairway,
        RoomKind::Storage,
        RoomKind::Toilet,
        RoomKind::Workshop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomKind::Office => "office",
            RoomKind::Classroom => "classroom",
            RoomKind::ConferenceRoom => "conference_room",
            RoomKind::Corridor => "corridor",
            RoomKind::Laboratory => "laboratory",
            RoomKind::Lobby => "lobby",
            RoomKind::Stairway => "stairway",
            RoomKind::Storage => "storage",
            RoomKind::Toilet => "toilet",
            RoomKind::Workshop => "workshop",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown room kind: {s}"))
    }
}

/// Surface reflectance coefficients, each in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflectances {
    pub ceiling: f64,
    pub walls: f64,
    pub floor: f64,
}

impl Default for Reflectances {
    /// Standard assumed reflectances: light ceiling, medium walls, dark floor.
    fn default() -> Self {
        Self {
            ceiling: 0.80,
            walls: 0.50,
            floor: 0.20,
        }
    }
}

/// A single room within a floor.
///
/// Geometric dimensions are in meters. Optional fields fall back to the
/// configured defaults when a calculation needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub floor_id: Uuid,
    pub name: String,
    pub kind: RoomKind,
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
    /// Explicit floor area for non-rectangular rooms. When `None`, the
    /// area is `length_m * width_m`.
    #[serde(default)]
    pub area_override_m2: Option<f64>,
    #[serde(default)]
    pub reflectances: Option<Reflectances>,
    /// Maintenance factor in `(0.0, 1.0]`; becomes the light loss factor.
    #[serde(default)]
    pub maintenance_factor: Option<f64>,
    /// Height of the working plane above the floor.
    #[serde(default)]
    pub work_plane_m: Option<f64>,
}

impl Room {
    pub fn new(
        floor_id: Uuid,
        name: impl Into<String>,
        kind: RoomKind,
        length_m: f64,
        width_m: f64,
        height_m: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            floor_id,
            name: name.into(),
            kind,
            length_m,
            width_m,
            height_m,
            area_override_m2: None,
            reflectances: None,
            maintenance_factor: None,
            work_plane_m: None,
        }
    }

    /// Floor area in square meters.
    pub fn area_m2(&self) -> f64 {
        self.area_override_m2
            .unwrap_or(self.length_m * self.width_m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_from_dimensions() {
        let room = Room::new(Uuid::nil(), "R", RoomKind::Office, 5.0, 4.0, 3.0);
        assert_eq!(room.area_m2(), 20.0);
    }

    #[test]
    fn test_area_override_wins() {
        let mut room = Room::new(Uuid::nil(), "R", RoomKind::Office, 5.0, 4.0, 3.0);
        room.area_override_m2 = Some(18.5);
        assert_eq!(room.area_m2(), 18.5);
    }

    #[test]
    fn test_room_kind_round_trip() {
        for kind in RoomKind::ALL {
            let parsed: RoomKind = kind.as_str().parse().unwrap();
            assert_eq!(parsed, kind);
        }
        assert!("ballroom".parse::<RoomKind>().is_err());
    }
}
