use super::{ProjectId, UserId};
use crate::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload accepted by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_requirements: Vec<String>,
    #[serde(default, rename = "private")]
    pub is_private: bool,
    #[serde(default)]
    pub github_link: Option<String>,
}

impl ProjectRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Payload checks performed by the request layer before a service call.
    /// The service itself never calls this.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::ValidationError("Title cannot be empty".to_string()));
        }

        if self.description.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Description cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Persisted project record.
///
/// The owner is fixed at construction: there is no setter, and
/// [`Project::apply_update`] only touches the descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Option<ProjectId>, // None until the store assigns one
    pub title: String,
    pub description: String,
    pub tech_requirements: Vec<String>,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub github_link: Option<String>,
    owner_id: UserId,
    pub current_contributor_ids: Vec<Option<UserId>>,
    pub past_contributor_ids: Vec<Option<UserId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn new(request: ProjectRequest, owner_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title: request.title,
            description: request.description,
            tech_requirements: request.tech_requirements,
            is_private: request.is_private,
            github_link: request.github_link,
            owner_id,
            current_contributor_ids: Vec::new(),
            past_contributor_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_id(
        id: ProjectId,
        title: String,
        description: String,
        tech_requirements: Vec<String>,
        is_private: bool,
        github_link: Option<String>,
        owner_id: UserId,
        current_contributor_ids: Vec<Option<UserId>>,
        past_contributor_ids: Vec<Option<UserId>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Some(id),
            title,
            description,
            tech_requirements,
            is_private,
            github_link,
            owner_id,
            current_contributor_ids,
            past_contributor_ids,
            created_at,
            updated_at,
        }
    }

    pub fn owner_id(&self) -> UserId {
        self.owner_id
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Overwrites the editable fields. Owner and contributor lists are left alone.
    pub fn apply_update(&mut self, request: ProjectRequest) {
        self.title = request.title;
        self.description = request.description;
        self.tech_requirements = request.tech_requirements;
        self.is_private = request.is_private;
        self.github_link = request.github_link;
        self.updated_at = Utc::now();
    }
}
