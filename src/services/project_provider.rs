//! Loading the project snapshot once a session exists.

use crate::error::SecretlyError;
use crate::model::Project;
use crate::services::auth::Session;
use std::path::PathBuf;
use tracing::{debug, info};

/// Source of project snapshots. Calls may block.
pub trait ProjectProvider: Send + Sync {
    /// Fails with `Unauthorized` for an unusable session and `Unavailable`
    /// when the snapshot cannot be produced.
    fn fetch_project(&self, session: &Session) -> Result<Project, SecretlyError>;
}

/// Serves a JSON snapshot file, or the demo project when none is configured.
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    path: Option<PathBuf>,
}

impl SnapshotProvider {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

impl ProjectProvider for SnapshotProvider {
    fn fetch_project(&self, session: &Session) -> Result<Project, SecretlyError> {
        if session.token.trim().is_empty() {
            return Err(SecretlyError::Unauthorized);
        }

        let Some(path) = &self.path else {
            debug!("No project file configured, serving demo project");
            return Ok(Project::demo());
        };

        let content = std::fs::read_to_string(path)
            .map_err(|e| SecretlyError::Unavailable(format!("{}: {}", path.display(), e)))?;
        let project: Project = serde_json::from_str(&content)
            .map_err(|e| SecretlyError::Unavailable(format!("{}: {}", path.display(), e)))?;
        project
            .validate()
            .map_err(|e| SecretlyError::Unavailable(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded project '{}' with {} environments from {:?}",
            project.name,
            project.environments.len(),
            path
        );
        Ok(project)
    }
}
