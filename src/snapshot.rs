use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Department, Project, Task, User};

/// One materialized snapshot of the tracked entities. The engine only
/// ever reads it; ownership and mutation stay with the persistence
/// layer that produced the export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub departments: Vec<Department>,
}

impl Snapshot {
    /// Parse a snapshot from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(s)?;
        log::debug!(
            "loaded snapshot: {} projects, {} tasks, {} users, {} departments",
            snapshot.projects.len(),
            snapshot.tasks.len(),
            snapshot.users.len(),
            snapshot.departments.len()
        );
        Ok(snapshot)
    }

    /// Load a snapshot from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// The default snapshot location (`~/.orgreport/snapshot.json`).
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::home_dir()
            .ok_or_else(|| Error::Config("cannot determine home directory".into()))?
            .join(".orgreport");
        Ok(dir.join("snapshot.json"))
    }

    /// Total embedded subtasks across all tasks.
    pub fn subtask_count(&self) -> usize {
        self.tasks.iter().map(|t| t.subtasks.len()).sum()
    }
}
