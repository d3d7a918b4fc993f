//! In-memory project store, used in tests and for ephemeral deployments.

use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::project::{NewProject, Project, ProjectPatch};

use super::{ProjectStore, StorageResult};

#[derive(Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<Uuid, Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn create(&self, new: NewProject) -> StorageResult<Project> {
        let project = Project::from_new(new);
        self.projects.write().insert(project.id, project.clone());
        Ok(project)
    }

    fn get(&self, id: Uuid) -> StorageResult<Option<Project>> {
        Ok(self.projects.read().get(&id).cloned())
    }

    fn update(&self, id: Uuid, patch: ProjectPatch) -> StorageResult<Option<Project>> {
        let mut projects = self.projects.write();
        let Some(project) = projects.get_mut(&id) else {
            return Ok(None);
        };
        project.apply(patch);
        Ok(Some(project.clone()))
    }

    fn list(&self) -> StorageResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.projects.read().values().cloned().collect();
        projects.sort_by_key(|p| p.created_at);
        Ok(projects)
    }
}
