//! # Enaudit Core Library
//!
//! This library provides the core business logic for enaudit, an
//! energy-audit toolkit. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI
//! being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Building Store**: in-memory structure mapping floors to rooms and
//!   rooms to computed metric snapshots
//! - **Lighting**: illuminance requirement table, lamp catalog, and the
//!   illumination calculator (pure function of its inputs)
//! - **Loads**: panel load-schedule aggregation (connected/demand load,
//!   current, protection sizing)
//! - **Signature**: signature-capture pad modeled as an explicit state
//!   machine, decoupled from rendering
//! - **Storage**: TOML-based configuration and JSON project files
//!
//! ## Key Components
//!
//! - [`compute_illumination`]: Room + lamp + requirement -> [`IlluminationResult`]
//! - [`aggregate_schedule`]: load item drafts -> [`LoadSchedule`]
//! - [`SignaturePad`]: Editing/Closed state machine producing [`DigitalSignature`]
//! - [`BuildingStore`]: building model plus cached per-room metrics
//! - [`Config`]: documented calculation defaults (reflectances, tariff, hours)

pub mod building;
pub mod error;
pub mod lighting;
pub mod loads;
pub mod signature;
pub mod storage;

pub use building::{Building, BuildingStore, Floor, Reflectances, Room, RoomKind, RoomMetrics};
pub use error::{ConfigError, CoreError, Result};
pub use lighting::{
    builtin_catalog, compute_illumination, find_catalog_lamp, IlluminationRequirement,
    IlluminationResult, LampType, LightingDefaults, RequirementTable,
};
pub use loads::{aggregate_schedule, FeederSpec, LoadItem, LoadItemDraft, LoadSchedule, PanelParams};
pub use signature::{DigitalSignature, PadState, Point, SignaturePad, Stroke};
pub use storage::{Config, ProjectStore};
