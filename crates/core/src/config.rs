//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. The intent is to avoid reading process-wide environment
//! variables during request handling, which can lead to inconsistent
//! behaviour in multi-threaded runtimes and test harnesses.

use crate::store::STORE_FILE_NAME;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    project_data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `project_data_dir` is where the durable project store lives; it need
    /// not exist yet (it is created on first write) but must not be empty.
    pub fn new(project_data_dir: PathBuf) -> CoreResult<Self> {
        if project_data_dir.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "project data directory cannot be empty".into(),
            ));
        }
        Ok(Self { project_data_dir })
    }

    pub fn project_data_dir(&self) -> &Path {
        &self.project_data_dir
    }

    /// Full path of the durable project store document.
    pub fn store_path(&self) -> PathBuf {
        self.project_data_dir.join(STORE_FILE_NAME)
    }
}
