use super::{Project, ProjectId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response-ready projection of a [`Project`], enriched with user display
/// fields at read time. Never persisted.
///
/// `None` on an enriched field means the field was not computed; a
/// `Some(vec![])` contributor list means ids were present but none resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    pub id: Option<ProjectId>,
    pub title: String,
    pub description: String,
    pub tech_requirements: Vec<String>,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub github_link: Option<String>,
    pub owner_id: UserId,
    pub current_contributor_ids: Vec<Option<UserId>>,
    pub past_contributor_ids: Vec<Option<UserId>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_profile_pic_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_contributors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_contributors: Option<Vec<String>>,
}

impl From<Project> for ProjectView {
    fn from(project: Project) -> Self {
        let owner_id = project.owner_id();
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            tech_requirements: project.tech_requirements,
            is_private: project.is_private,
            github_link: project.github_link,
            owner_id,
            current_contributor_ids: project.current_contributor_ids,
            past_contributor_ids: project.past_contributor_ids,
            created_at: project.created_at,
            updated_at: project.updated_at,
            owner_username: None,
            owner_profile_pic_url: None,
            current_contributors: None,
            past_contributors: None,
        }
    }
}

impl ProjectView {
    pub fn has_owner_details(&self) -> bool {
        self.owner_username.is_some()
    }
}
