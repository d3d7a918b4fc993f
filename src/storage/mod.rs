//! Project persistence.
//!
//! Storage is injected behind [`ProjectStore`] so the pricing and progress
//! code stays pure and the backend can be swapped (in-memory for tests, a
//! JSON file in the original deployment, a database later).

pub mod file;
pub mod memory;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::project::{NewProject, Project, ProjectPatch};

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed")]
    Io(#[from] std::io::Error),

    #[error("stored data is corrupt")]
    Corrupt(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Create/read/update/list operations on projects. Implementations must be
/// safe to call from concurrent request handlers.
pub trait ProjectStore: Send + Sync {
    fn create(&self, new: NewProject) -> StorageResult<Project>;

    fn get(&self, id: Uuid) -> StorageResult<Option<Project>>;

    /// Apply a patch to an existing project. Returns `None` when the project
    /// does not exist.
    fn update(&self, id: Uuid, patch: ProjectPatch) -> StorageResult<Option<Project>>;

    fn list(&self) -> StorageResult<Vec<Project>>;
}
