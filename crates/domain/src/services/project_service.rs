use crate::context::RequestContext;
use crate::entities::{Project, ProjectId, ProjectRequest, ProjectView};
use crate::errors::DomainError;
use crate::repositories::{ProjectRepository, UserDirectory};
use crate::services::enrichment::{EnrichmentPolicy, ProjectEnricher};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Project lifecycle operations with owner-only mutation.
///
/// Holds no mutable state; one instance is shared by all concurrent requests.
pub struct ProjectService {
    project_repository: Arc<dyn ProjectRepository>,
    enricher: ProjectEnricher,
}

impl ProjectService {
    pub fn new(
        project_repository: Arc<dyn ProjectRepository>,
        user_directory: Arc<dyn UserDirectory>,
    ) -> Self {
        Self::with_enrichment_policy(project_repository, user_directory, EnrichmentPolicy::default())
    }

    pub fn with_enrichment_policy(
        project_repository: Arc<dyn ProjectRepository>,
        user_directory: Arc<dyn UserDirectory>,
        policy: EnrichmentPolicy,
    ) -> Self {
        Self {
            project_repository,
            enricher: ProjectEnricher::new(user_directory, policy),
        }
    }

    /// Get a project by id. Reads are not restricted, whatever the private flag says.
    pub async fn get_project(&self, project_id: &str) -> Result<ProjectView, DomainError> {
        let project = self.find_project(project_id).await?;
        self.enricher.enrich(project).await
    }

    /// Create a project owned by the acting user
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        request: ProjectRequest,
    ) -> Result<ProjectView, DomainError> {
        let project = Project::new(request, ctx.acting_user_id());
        let saved = self.project_repository.save(&project).await?;

        info!(
            project_id = ?saved.id,
            owner_id = %saved.owner_id(),
            "created project"
        );

        self.enricher.enrich(saved).await
    }

    /// Overwrite the editable fields of a project.
    ///
    /// Existence is checked before ownership, ownership before any mutation.
    pub async fn update_project(
        &self,
        ctx: &RequestContext,
        project_id: &str,
        request: ProjectRequest,
    ) -> Result<ProjectView, DomainError> {
        let mut project = self.find_project(project_id).await?;
        ensure_owner(&project, ctx, "update")?;

        project.apply_update(request);
        let saved = self.project_repository.save(&project).await?;

        debug!(project_id, "updated project");
        self.enricher.enrich(saved).await
    }

    /// Permanently delete a project. Contributor references elsewhere are left as-is.
    pub async fn delete_project(
        &self,
        ctx: &RequestContext,
        project_id: &str,
    ) -> Result<bool, DomainError> {
        let project = self.find_project(project_id).await?;
        ensure_owner(&project, ctx, "delete")?;

        let id = project.id.ok_or_else(DomainError::project_not_found)?;
        self.project_repository.delete(id).await?;

        info!(project_id, "deleted project");
        Ok(true)
    }

    /// Malformed ids are reported the same way as unknown ones.
    async fn find_project(&self, project_id: &str) -> Result<Project, DomainError> {
        let id: ProjectId = project_id.parse().map_err(|_| {
            debug!(project_id, "malformed project id");
            DomainError::project_not_found()
        })?;

        self.project_repository
            .find_by_id(id)
            .await?
            .ok_or_else(DomainError::project_not_found)
    }
}

fn ensure_owner(project: &Project, ctx: &RequestContext, action: &str) -> Result<(), DomainError> {
    if project.is_owned_by(ctx.acting_user_id()) {
        return Ok(());
    }

    warn!(
        project_id = ?project.id,
        acting_user_id = %ctx.acting_user_id(),
        action,
        "rejected non-owner"
    );
    Err(DomainError::Unauthorized(format!(
        "Not authorized to {} this project",
        action
    )))
}
