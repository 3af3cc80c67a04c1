//! Durable project store.
//!
//! One JSON document at a well-known path, wrapped in a versioned envelope
//! `{schema_version, project}`, rewritten after every successful mutation
//! and loaded once at startup. Last-write-wins is sufficient: this is a
//! single-writer store with no external writers.
//!
//! Load failures never abort startup. A missing file means an empty
//! project; an unreadable, unparseable or version-incompatible document is
//! logged and treated the same way.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tdr_types::Project;
use tracing::warn;

/// Current store format version.
pub const SCHEMA_VERSION: u32 = 1;

/// Filename of the store document under the project data directory.
pub const STORE_FILE_NAME: &str = "project.json";

#[derive(Serialize, Deserialize)]
struct StoredProject {
    schema_version: u32,
    project: Project,
}

/// File-backed store for the single project document.
#[derive(Debug)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    /// Creates a store over the given document path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the persisted project, or an empty one.
    ///
    /// Never fails: any problem reading or interpreting the document is
    /// logged and an empty project returned, so a corrupt store cannot
    /// brick the service.
    pub fn load(&self) -> Project {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Project::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read project store; starting empty");
                return Project::default();
            }
        };

        let stored: StoredProject = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse project store; starting empty");
                return Project::default();
            }
        };

        if stored.schema_version != SCHEMA_VERSION {
            warn!(
                found = stored.schema_version,
                expected = SCHEMA_VERSION,
                "project store has an incompatible schema version; starting empty"
            );
            return Project::default();
        }

        stored.project
    }

    /// Persists the project, creating the data directory if needed.
    pub fn save(&self, project: &Project) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(CoreError::StoreWrite)?;
        }

        let stored = StoredProject {
            schema_version: SCHEMA_VERSION,
            project: project.clone(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(CoreError::StoreSerialization)?;
        fs::write(&self.path, json).map_err(CoreError::StoreWrite)
    }

    /// Removes the store document. A document that never existed is fine.
    pub fn clear(&self) -> CoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CoreError::StoreWrite(e)),
        }
    }

    /// Whether a store document currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdr_types::{Requirement, Rfp};
    use tempfile::TempDir;

    fn sample_project() -> Project {
        Project {
            rfp: Some(Rfp {
                title: "Acme Office Renovation".into(),
                raw_text: "...".into(),
                requirements: vec![Requirement {
                    text: "Budget under $500k".into(),
                    category: "Financial".into(),
                }],
            }),
            bids: vec![],
            analysis: None,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = ProjectStore::new(temp.path().join("project.json"));
        assert_eq!(store.load(), Project::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = ProjectStore::new(temp.path().join("data").join("project.json"));

        let project = sample_project();
        store.save(&project).unwrap();
        assert!(store.exists());
        assert_eq!(store.load(), project);
    }

    #[test]
    fn test_envelope_carries_schema_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("project.json");
        let store = ProjectStore::new(path.clone());

        store.save(&sample_project()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["schema_version"], SCHEMA_VERSION);
    }

    #[test]
    fn test_unknown_version_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("project.json");
        std::fs::write(
            &path,
            r#"{"schema_version": 99, "project": {"rfp": null, "bids": [], "analysis": null}}"#,
        )
        .unwrap();

        let store = ProjectStore::new(path);
        assert_eq!(store.load(), Project::default());
    }

    #[test]
    fn test_corrupt_document_starts_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("project.json");
        std::fs::write(&path, "{{{ not json").unwrap();

        let store = ProjectStore::new(path);
        assert_eq!(store.load(), Project::default());
    }

    #[test]
    fn test_clear_removes_document() {
        let temp = TempDir::new().unwrap();
        let store = ProjectStore::new(temp.path().join("project.json"));

        store.save(&sample_project()).unwrap();
        store.clear().unwrap();
        assert!(!store.exists());

        // Clearing again is not an error.
        store.clear().unwrap();
    }
}
