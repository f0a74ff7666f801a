use clap::Subcommand;
use std::path::PathBuf;
use uuid::Uuid;

use enaudit_core::{
    find_catalog_lamp, Building, BuildingStore, Config, ProjectStore, RequirementTable, Room,
    RoomKind,
};

#[derive(Subcommand)]
pub enum BuildingAction {
    /// Create a new project file
    Init {
        /// Building name
        name: String,
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Add a floor
    AddFloor {
        /// Floor level (ground = 0)
        level: i32,
        /// Floor name
        name: String,
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Add a room to a floor
    AddRoom {
        /// Floor level the room is on
        #[arg(long)]
        level: i32,
        /// Room name
        name: String,
        /// Room kind (e.g. "office")
        #[arg(long)]
        kind: String,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        width: f64,
        #[arg(long)]
        height: f64,
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// List floors and rooms
    List {
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Compute and cache illumination for a room by name
    Illuminate {
        /// Room name
        room: String,
        /// Catalog fixture name
        #[arg(long, default_value = "LED panel 36W")]
        lamp: String,
        #[arg(long)]
        project: Option<PathBuf>,
    },
    /// Print cached metrics for a room by name
    Metrics {
        /// Room name
        room: String,
        #[arg(long)]
        project: Option<PathBuf>,
    },
}

fn open_project(path: Option<PathBuf>) -> Result<ProjectStore, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(ProjectStore::at(p)),
        None => ProjectStore::open_default(),
    }
}

fn find_room_id(store: &BuildingStore, name: &str) -> Result<Uuid, Box<dyn std::error::Error>> {
    store
        .building
        .rooms()
        .find(|r| r.name.eq_ignore_ascii_case(name))
        .map(|r| r.id)
        .ok_or_else(|| format!("no room named '{name}'").into())
}

pub fn run(action: BuildingAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BuildingAction::Init { name, project } => {
            let project = open_project(project)?;
            let store = BuildingStore::new(Building::new(name));
            project.save(&store)?;
            println!("project created: {}", project.path().display());
        }
        BuildingAction::AddFloor { level, name, project } => {
            let project = open_project(project)?;
            let mut store = project.load()?;
            let id = store.building.add_floor(level, name);
            project.save(&store)?;
            println!("{id}");
        }
        BuildingAction::AddRoom {
            level,
            name,
            kind,
            length,
            width,
            height,
            project,
        } => {
            let project = open_project(project)?;
            let mut store = project.load()?;
            let kind: RoomKind = kind.parse()?;
            let floor_id = store
                .building
                .floor_by_level(level)
                .map(|f| f.id)
                .ok_or_else(|| format!("no floor at level {level}"))?;
            let room = Room::new(floor_id, name, kind, length, width, height);
            let id = store.building.add_room(floor_id, room)?;
            project.save(&store)?;
            println!("{id}");
        }
        BuildingAction::List { project } => {
            let project = open_project(project)?;
            let store = project.load()?;
            println!("{}", store.building.name);
            for floor in &store.building.floors {
                println!("  [{}] {}", floor.level, floor.name);
                for room in &floor.rooms {
                    println!(
                        "    {} ({}, {:.1}x{:.1}x{:.1} m, {:.1} m²)",
                        room.name,
                        room.kind,
                        room.length_m,
                        room.width_m,
                        room.height_m,
                        room.area_m2()
                    );
                }
            }
        }
        BuildingAction::Illuminate { room, lamp, project } => {
            let project = open_project(project)?;
            let mut store = project.load()?;
            let room_id = find_room_id(&store, &room)?;
            let lamp = find_catalog_lamp(&lamp)
                .ok_or_else(|| format!("unknown catalog fixture: {lamp}"))?;
            let defaults = Config::load()?.lighting_defaults();
            let result = store.compute_room_illumination(
                room_id,
                &lamp,
                &RequirementTable::default(),
                &defaults,
            )?;
            project.save(&store)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        BuildingAction::Metrics { room, project } => {
            let project = open_project(project)?;
            let store = project.load()?;
            let room_id = find_room_id(&store, &room)?;
            match store.metrics(room_id) {
                Some(metrics) => println!("{}", serde_json::to_string_pretty(metrics)?),
                None => println!("no metrics computed for '{room}'"),
            }
        }
    }
    Ok(())
}
