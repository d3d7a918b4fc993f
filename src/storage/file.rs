//! JSON-file project store.
//!
//! Keeps the whole project list in a single pretty-printed JSON file, read
//! and rewritten on every operation. A missing or empty file reads as an
//! empty list. Adequate for the handful of projects a single sales site
//! produces; the mutex serializes read-modify-write cycles within this
//! process.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::domain::project::{NewProject, Project, ProjectPatch};

use super::{ProjectStore, StorageResult};

pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> StorageResult<Vec<Project>> {
        match fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, projects: &[Project]) -> StorageResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_vec_pretty(projects)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectStore for FileStore {
    fn create(&self, new: NewProject) -> StorageResult<Project> {
        let _guard = self.lock.lock();
        let mut projects = self.read_all()?;
        let project = Project::from_new(new);
        projects.push(project.clone());
        self.write_all(&projects)?;
        Ok(project)
    }

    fn get(&self, id: Uuid) -> StorageResult<Option<Project>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.into_iter().find(|p| p.id == id))
    }

    fn update(&self, id: Uuid, patch: ProjectPatch) -> StorageResult<Option<Project>> {
        let _guard = self.lock.lock();
        let mut projects = self.read_all()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        project.apply(patch);
        let updated = project.clone();
        self.write_all(&projects)?;
        Ok(Some(updated))
    }

    fn list(&self) -> StorageResult<Vec<Project>> {
        let _guard = self.lock.lock();
        self.read_all()
    }
}
