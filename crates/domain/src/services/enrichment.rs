use crate::entities::{Project, ProjectView, User, UserId};
use crate::errors::DomainError;
use crate::repositories::UserDirectory;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// How an unresolvable owner affects contributor enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnrichmentPolicy {
    /// A missing owner suppresses all enrichment, contributors included.
    #[default]
    OwnerGated,
    /// Owner and contributor fields are resolved independently.
    Independent,
}

impl EnrichmentPolicy {
    pub fn from_owner_gated(owner_gated: bool) -> Self {
        if owner_gated {
            EnrichmentPolicy::OwnerGated
        } else {
            EnrichmentPolicy::Independent
        }
    }
}

/// Turns persisted projects into [`ProjectView`]s by resolving the owner and
/// contributor ids against the user directory.
///
/// All ids referenced by one project are resolved with a single
/// [`UserDirectory::find_by_ids`] call.
pub struct ProjectEnricher {
    user_directory: Arc<dyn UserDirectory>,
    policy: EnrichmentPolicy,
}

impl ProjectEnricher {
    pub fn new(user_directory: Arc<dyn UserDirectory>, policy: EnrichmentPolicy) -> Self {
        Self {
            user_directory,
            policy,
        }
    }

    pub fn policy(&self) -> EnrichmentPolicy {
        self.policy
    }

    pub async fn enrich(&self, project: Project) -> Result<ProjectView, DomainError> {
        let ids = referenced_user_ids(&project);
        let users = self.user_directory.find_by_ids(&ids).await?;

        let mut view = ProjectView::from(project);

        match users.get(&view.owner_id) {
            Some(owner) => {
                view.owner_username = Some(owner.username.clone());
                view.owner_profile_pic_url = owner.profile_pic_url.clone();
            }
            None => {
                debug!(owner_id = %view.owner_id, "project owner not found in user directory");
                if self.policy == EnrichmentPolicy::OwnerGated {
                    return Ok(view);
                }
            }
        }

        view.current_contributors = resolve_usernames(&view.current_contributor_ids, &users);
        view.past_contributors = resolve_usernames(&view.past_contributor_ids, &users);

        Ok(view)
    }
}

/// Owner first, then every distinct non-null contributor id.
fn referenced_user_ids(project: &Project) -> Vec<UserId> {
    let mut seen = HashSet::new();
    std::iter::once(project.owner_id())
        .chain(project.current_contributor_ids.iter().flatten().copied())
        .chain(project.past_contributor_ids.iter().flatten().copied())
        .filter(|id| seen.insert(*id))
        .collect()
}

/// `None` when there is nothing to resolve; otherwise the usernames of the
/// ids that resolved, in source order. Nulls and misses are dropped.
fn resolve_usernames(
    ids: &[Option<UserId>],
    users: &HashMap<UserId, User>,
) -> Option<Vec<String>> {
    if ids.is_empty() {
        return None;
    }

    let usernames = ids
        .iter()
        .flatten()
        .filter_map(|id| users.get(id))
        .map(|user| user.username.clone())
        .collect::<Vec<_>>();

    let unresolved = unresolved_count(ids, usernames.len());
    if unresolved > 0 {
        debug!(
            requested = ids.len(),
            resolved = usernames.len(),
            unresolved,
            "dropped unresolved contributor ids"
        );
    }

    Some(usernames)
}

/// Non-null ids that failed to resolve. Null entries are not misses.
fn unresolved_count(ids: &[Option<UserId>], resolved: usize) -> usize {
    ids.iter().flatten().count().saturating_sub(resolved)
}
