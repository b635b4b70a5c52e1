//! In-memory fakes for the repository ports.

use crate::entities::{Project, ProjectId, User, UserId};
use crate::errors::DomainError;
use crate::repositories::{ProjectRepository, UserDirectory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct InMemoryProjectRepository {
    projects: Mutex<HashMap<ProjectId, Project>>,
    saves: AtomicUsize,
}

impl InMemoryProjectRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, mut project: Project) -> ProjectId {
        let id = *project.id.get_or_insert_with(ProjectId::new);
        self.projects.lock().unwrap().insert(id, project);
        id
    }

    pub fn get(&self, id: ProjectId) -> Option<Project> {
        self.projects.lock().unwrap().get(&id).cloned()
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: ProjectId) -> Result<Option<Project>, DomainError> {
        Ok(self.get(id))
    }

    async fn save(&self, project: &Project) -> Result<Project, DomainError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut project = project.clone();
        project.id.get_or_insert_with(ProjectId::new);
        self.insert(project.clone());
        Ok(project)
    }

    async fn delete(&self, id: ProjectId) -> Result<(), DomainError> {
        self.projects.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Directory relying on the default per-id `find_by_ids`.
#[derive(Default)]
pub struct FakeUserDirectory {
    users: Mutex<HashMap<UserId, User>>,
    failing: AtomicBool,
    single_calls: AtomicUsize,
}

impl FakeUserDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn batching() -> Arc<BatchingUserDirectory> {
        Arc::new(BatchingUserDirectory::default())
    }

    pub fn add(&self, user: User) -> UserId {
        let id = user.id;
        self.users.lock().unwrap().insert(id, user);
        id
    }

    pub fn fail_lookups(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn single_calls(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::RepositoryError("directory unavailable".to_string()));
        }
        Ok(self.users.lock().unwrap().get(id).cloned())
    }
}

#[async_trait]
impl UserDirectory for FakeUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.single_calls.fetch_add(1, Ordering::SeqCst);
        self.lookup(&id)
    }
}

/// Directory with a native batch lookup.
#[derive(Default)]
pub struct BatchingUserDirectory {
    inner: FakeUserDirectory,
    batch_calls: AtomicUsize,
    last_batch_len: AtomicUsize,
}

impl BatchingUserDirectory {
    pub fn add(&self, user: User) -> UserId {
        self.inner.add(user)
    }

    pub fn single_calls(&self) -> usize {
        self.inner.single_calls()
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn last_batch_len(&self) -> usize {
        self.last_batch_len.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserDirectory for BatchingUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<HashMap<UserId, User>, DomainError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.last_batch_len.store(ids.len(), Ordering::SeqCst);

        let mut found = HashMap::new();
        for id in ids {
            if let Some(user) = self.inner.lookup(id)? {
                found.insert(*id, user);
            }
        }
        Ok(found)
    }
}
