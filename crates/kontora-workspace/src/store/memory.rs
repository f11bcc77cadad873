//! In-process workspace store.
//!
//! Mirrors the contract of the Postgres store: creation takes a single lock
//! for the workspace, owner and quota rows, listing only returns
//! workspaces the viewer belongs to, and slugs are made unique with a
//! numeric suffix.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kontora_core::{Error, Result};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{WorkspaceStore, slugify};
use crate::model::{QuotaRecord, Tier, User, Workspace};

/// Workspace store kept in memory.
///
/// Clones share state.
#[derive(Clone, Default)]
pub struct MemoryWorkspaceStore {
    inner: Arc<Mutex<Inner>>,
    default_tier: Tier,
}

#[derive(Default)]
struct Inner {
    workspaces: Vec<Workspace>,
    owners: HashMap<Uuid, Uuid>,
    members: Vec<(Uuid, Uuid)>,
    quotas: HashMap<Uuid, QuotaRecord>,
    failure: Option<String>,
    create_calls: usize,
}

impl Inner {
    fn unique_slug(&self, name: &str) -> String {
        let base = slugify(name);
        let taken = |slug: &str| self.workspaces.iter().any(|w| w.slug == slug);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn check_failure(&self) -> Result<()> {
        match &self.failure {
            Some(msg) => Err(Error::store(msg.clone())),
            None => Ok(()),
        }
    }
}

impl MemoryWorkspaceStore {
    /// An empty store seeding new workspaces with free-tier quotas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed quotas of new workspaces from `tier`.
    pub fn with_default_tier(mut self, tier: Tier) -> Self {
        self.default_tier = tier;
        self
    }

    /// Make every subsequent call fail with `message`.
    pub async fn fail_with(&self, message: impl Into<String>) {
        self.inner.lock().await.failure = Some(message.into());
    }

    /// Undo [`fail_with`](Self::fail_with).
    pub async fn clear_failure(&self) {
        self.inner.lock().await.failure = None;
    }

    /// Insert or replace a quota record.
    pub async fn put_quota(&self, record: QuotaRecord) {
        self.inner
            .lock()
            .await
            .quotas
            .insert(record.workspace_id, record);
    }

    /// Remove a workspace's quota record, leaving tracking uninitialised.
    pub async fn remove_quota(&self, workspace_id: Uuid) {
        self.inner.lock().await.quotas.remove(&workspace_id);
    }

    /// Add `user` as a non-owner member of a workspace.
    pub async fn add_member(&self, workspace_id: Uuid, user: &User) {
        self.inner.lock().await.members.push((workspace_id, user.id));
    }

    /// The owner recorded for a workspace.
    pub async fn owner_of(&self, workspace_id: Uuid) -> Option<Uuid> {
        self.inner.lock().await.owners.get(&workspace_id).copied()
    }

    /// How many times creation has been attempted.
    pub async fn create_calls(&self) -> usize {
        self.inner.lock().await.create_calls
    }
}

#[async_trait]
impl WorkspaceStore for MemoryWorkspaceStore {
    async fn create_workspace_with_owner(&self, owner: &User, name: &str) -> Result<Workspace> {
        let mut inner = self.inner.lock().await;
        inner.create_calls += 1;
        inner.check_failure()?;

        let workspace = Workspace {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: inner.unique_slug(name),
        };

        inner.workspaces.push(workspace.clone());
        inner.owners.insert(workspace.id, owner.id);
        inner.members.push((workspace.id, owner.id));
        inner.quotas.insert(
            workspace.id,
            QuotaRecord::initial(workspace.id, self.default_tier),
        );

        Ok(workspace)
    }

    async fn list_workspaces(&self, viewer: &User) -> Result<Vec<Workspace>> {
        let inner = self.inner.lock().await;
        inner.check_failure()?;

        Ok(inner
            .workspaces
            .iter()
            .filter(|w| {
                inner
                    .members
                    .iter()
                    .any(|(ws, user)| *ws == w.id && *user == viewer.id)
            })
            .cloned()
            .collect())
    }

    async fn quota(&self, workspace_id: Uuid) -> Result<Option<QuotaRecord>> {
        let inner = self.inner.lock().await;
        inner.check_failure()?;
        Ok(inner.quotas.get(&workspace_id).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_create_assigns_owner_and_quota() {
        let store = MemoryWorkspaceStore::new();
        let owner = user();

        let ws = store
            .create_workspace_with_owner(&owner, "Acme Legal")
            .await
            .unwrap();

        assert_eq!(ws.name, "Acme Legal");
        assert_eq!(ws.slug, "acme-legal");
        assert_eq!(store.owner_of(ws.id).await, Some(owner.id));
        let quota = store.quota(ws.id).await.unwrap().unwrap();
        assert_eq!(quota, QuotaRecord::initial(ws.id, Tier::Free));
    }

    #[tokio::test]
    async fn test_create_uses_default_tier() {
        let store = MemoryWorkspaceStore::new().with_default_tier(Tier::Professional);
        let ws = store
            .create_workspace_with_owner(&user(), "Pro Co")
            .await
            .unwrap();
        let quota = store.quota(ws.id).await.unwrap().unwrap();
        assert_eq!(quota.max_users, 10);
    }

    #[tokio::test]
    async fn test_slugs_are_unique() {
        let store = MemoryWorkspaceStore::new();
        let a = store.create_workspace_with_owner(&user(), "Acme").await.unwrap();
        let b = store.create_workspace_with_owner(&user(), "acme").await.unwrap();
        let c = store.create_workspace_with_owner(&user(), "ACME!").await.unwrap();
        assert_eq!(a.slug, "acme");
        assert_eq!(b.slug, "acme-2");
        assert_eq!(c.slug, "acme-3");
    }

    #[tokio::test]
    async fn test_list_only_member_workspaces() {
        let store = MemoryWorkspaceStore::new();
        let alice = user();
        let bob = user();

        let mine = store
            .create_workspace_with_owner(&alice, "Alice Co")
            .await
            .unwrap();
        let theirs = store
            .create_workspace_with_owner(&bob, "Bob Co")
            .await
            .unwrap();

        assert_eq!(store.list_workspaces(&alice).await.unwrap(), vec![mine.clone()]);

        store.add_member(theirs.id, &alice).await;
        assert_eq!(store.list_workspaces(&alice).await.unwrap(), vec![mine, theirs]);
    }

    #[tokio::test]
    async fn test_failure_leaves_no_partial_workspace() {
        let store = MemoryWorkspaceStore::new();
        let owner = user();
        store.fail_with("connection refused").await;

        let err = store
            .create_workspace_with_owner(&owner, "Acme")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(store.create_calls().await, 1);

        store.clear_failure().await;
        assert!(store.list_workspaces(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quota_missing_and_removed() {
        let store = MemoryWorkspaceStore::new();
        assert!(store.quota(Uuid::new_v4()).await.unwrap().is_none());

        let ws = store.create_workspace_with_owner(&user(), "Acme").await.unwrap();
        store.remove_quota(ws.id).await;
        assert!(store.quota(ws.id).await.unwrap().is_none());
    }
}
