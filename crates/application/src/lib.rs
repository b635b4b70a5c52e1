use config::Config;
use domain::{DomainError, EnrichmentPolicy, ProjectService};
use infrastructure::{Database, SqliteProjectRepository, SqliteUserDirectory};
use std::sync::Arc;
use tracing::info;

/// Project Application - wires the SQLite adapters into the domain services
pub struct ProjectApp {
    pub project_service: ProjectService,
    project_repository: Arc<SqliteProjectRepository>,
    user_directory: Arc<SqliteUserDirectory>,
}

impl ProjectApp {
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        Self::new_with_policy(database_path, EnrichmentPolicy::default())
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        Self::new_with_policy(
            &config.database_path,
            EnrichmentPolicy::from_owner_gated(config.owner_gated_enrichment),
        )
    }

    pub fn new_with_policy(
        database_path: &str,
        policy: EnrichmentPolicy,
    ) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)?;
        let pool = database.get_pool().clone();

        // Create repository implementations
        let project_repository = Arc::new(SqliteProjectRepository::new(pool.clone()));
        let user_directory = Arc::new(SqliteUserDirectory::new(pool));

        // Domain services
        let project_service = ProjectService::with_enrichment_policy(
            project_repository.clone(),
            user_directory.clone(),
            policy,
        );

        info!(?policy, "project application initialized");

        Ok(Self {
            project_service,
            project_repository,
            user_directory,
        })
    }

    /// Direct store access, bypassing ownership rules. Used for seeding.
    pub fn project_repository(&self) -> &Arc<SqliteProjectRepository> {
        &self.project_repository
    }

    pub fn user_directory(&self) -> &Arc<SqliteUserDirectory> {
        &self.user_directory
    }
}
