//! JSON project files.
//!
//! A project file is one [`BuildingStore`] serialized as pretty JSON
//! together with a version tag and the save timestamp. The core performs
//! no database access; this file is the entire persistence boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::building::BuildingStore;
use crate::error::Result;

const PROJECT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ProjectDocument {
    version: u32,
    saved_at: DateTime<Utc>,
    store: BuildingStore,
}

/// Loads and saves a project file at a fixed path.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// A store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store at `~/.config/enaudit/project.json`.
    pub fn open_default() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::at(data_dir()?.join("project.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read the building store back from disk.
    pub fn load(&self) -> Result<BuildingStore> {
        let content = std::fs::read_to_string(&self.path)?;
        let doc: ProjectDocument = serde_json::from_str(&content)?;
        Ok(doc.store)
    }

    /// Write the building store to disk, replacing any previous content.
    pub fn save(&self, store: &BuildingStore) -> Result<()> {
        let doc = ProjectDocument {
            version: PROJECT_FORMAT_VERSION,
            saved_at: Utc::now(),
            store: store.clone(),
        };
        let content = serde_json::to_string_pretty(&doc)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
