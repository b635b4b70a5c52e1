use crate::entities::{User, UserId};
use crate::errors::DomainError;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::collections::HashMap;

/// Read-only view of the identity subsystem's user store.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Resolves many ids at once. Ids with no user are absent from the map.
    ///
    /// The default issues one `find_by_id` per id, concurrently. Directories
    /// with a native batch query should override it.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, User>, DomainError> {
        let lookups = ids.iter().map(|id| self.find_by_id(*id));
        let users = try_join_all(lookups).await?;

        Ok(users
            .into_iter()
            .flatten()
            .map(|user| (user.id, user))
            .collect())
    }
}
