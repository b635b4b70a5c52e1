use crate::entities::{Project, ProjectId};
use crate::errors::DomainError;
use async_trait::async_trait;

/// Id-keyed document store for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, DomainError>;
    /// Inserts or replaces the project, assigning an id when it has none.
    async fn save(&self, project: &Project) -> Result<Project, DomainError>;
    async fn delete(&self, id: ProjectId) -> Result<(), DomainError>;
}
