use crate::database::{projects, run_blocking, SqlitePool};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use domain::{DomainError, Project, ProjectId, ProjectRepository, UserId};

// Database model - separate from domain entity
#[derive(Queryable, Selectable, Insertable, Debug)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
struct ProjectModel {
    id: String,
    title: String,
    description: String,
    tech_requirements: String,
    is_private: bool,
    github_link: Option<String>,
    owner_id: String,
    current_contributor_ids: String,
    past_contributor_ids: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl ProjectModel {
    fn from_project(id: ProjectId, project: &Project) -> Result<Self, DomainError> {
        Ok(ProjectModel {
            id: id.to_string(),
            title: project.title.clone(),
            description: project.description.clone(),
            tech_requirements: encode(&project.tech_requirements)?,
            is_private: project.is_private,
            github_link: project.github_link.clone(),
            owner_id: project.owner_id().to_string(),
            current_contributor_ids: encode(&project.current_contributor_ids)?,
            past_contributor_ids: encode(&project.past_contributor_ids)?,
            created_at: project.created_at.naive_utc(),
            updated_at: project.updated_at.naive_utc(),
        })
    }
}

impl TryFrom<ProjectModel> for Project {
    type Error = DomainError;

    fn try_from(model: ProjectModel) -> Result<Self, Self::Error> {
        let id: ProjectId = model.id.parse().map_err(|e| {
            DomainError::RepositoryError(format!("Corrupt project id {}: {}", model.id, e))
        })?;
        let owner_id: UserId = model.owner_id.parse().map_err(|e| {
            DomainError::RepositoryError(format!("Corrupt owner id {}: {}", model.owner_id, e))
        })?;

        Ok(Project::with_id(
            id,
            model.title,
            model.description,
            decode(&model.tech_requirements)?,
            model.is_private,
            model.github_link,
            owner_id,
            decode(&model.current_contributor_ids)?,
            decode(&model.past_contributor_ids)?,
            model.created_at.and_utc(),
            model.updated_at.and_utc(),
        ))
    }
}

fn encode<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, DomainError> {
    serde_json::to_string(value).map_err(|e| DomainError::RepositoryError(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(column: &str) -> Result<T, DomainError> {
    serde_json::from_str(column).map_err(|e| DomainError::RepositoryError(e.to_string()))
}

pub struct SqliteProjectRepository {
    pool: SqlitePool,
}

impl SqliteProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, DomainError> {
        let id = id.to_string();
        let result = run_blocking(&self.pool, move |conn| {
            projects::table
                .filter(projects::id.eq(id))
                .select(ProjectModel::as_select())
                .first::<ProjectModel>(conn)
                .optional()
        })
        .await?;

        result.map(Project::try_from).transpose()
    }

    async fn save(&self, project: &Project) -> Result<Project, DomainError> {
        let id = project.id.unwrap_or_else(ProjectId::new);
        let model = ProjectModel::from_project(id, project)?;
        let id = model.id.clone();

        let result = run_blocking(&self.pool, move |conn| {
            // Whole-document write: last writer wins
            diesel::replace_into(projects::table)
                .values(&model)
                .execute(conn)?;

            projects::table
                .filter(projects::id.eq(id))
                .select(ProjectModel::as_select())
                .first::<ProjectModel>(conn)
        })
        .await?;

        Project::try_from(result)
    }

    async fn delete(&self, id: ProjectId) -> Result<(), DomainError> {
        let id = id.to_string();
        run_blocking(&self.pool, move |conn| {
            diesel::delete(projects::table.filter(projects::id.eq(id))).execute(conn)
        })
        .await?;

        Ok(())
    }
}
