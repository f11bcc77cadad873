//! Dashboard selection state.
//!
//! Holds the signed-in user, the workspaces they can see, and which one is
//! selected. The dashboard shell owns one `DashboardState` and passes it to
//! the views that need it; all changes go through the setters below.
//!
//! # Initialization order
//!
//! [`DashboardState::initialize`] resolves the user before loading
//! workspaces. Without a user, nothing is loaded.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use kontora_workspace::{DashboardState, MemoryWorkspaceStore, StaticAuth, User, WorkspaceService};
//! use uuid::Uuid;
//!
//! # tokio_test::block_on(async {
//! let user = User::new(Uuid::new_v4());
//! let service = WorkspaceService::new(
//!     Arc::new(StaticAuth::signed_in(user)),
//!     Arc::new(MemoryWorkspaceStore::new()),
//! );
//!
//! let mut state = DashboardState::initialize(&service).await;
//! assert!(state.workspaces().is_empty());
//!
//! let created = service.create_workspace("Acme Legal").await;
//! if let Some(ws) = created.data {
//!     state.record_created(ws);
//! }
//! assert_eq!(state.current_workspace().map(|w| w.slug.as_str()), Some("acme-legal"));
//! # });
//! ```

use uuid::Uuid;

use crate::auth::AuthProvider;
use crate::model::{User, Workspace};
use crate::service::WorkspaceService;
use crate::store::WorkspaceStore;

/// Explicit replacement for a global "current workspace" store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    user: Option<User>,
    workspaces: Vec<Workspace>,
    current: Option<Uuid>,
}

impl DashboardState {
    /// Resolve the user, then load their workspaces and select the first.
    pub async fn initialize<A, S>(service: &WorkspaceService<A, S>) -> Self
    where
        A: AuthProvider + ?Sized,
        S: WorkspaceStore + ?Sized,
    {
        let Some(user) = service.current_user().await else {
            return Self::default();
        };

        let workspaces = service
            .list_workspaces_as(Some(&user))
            .await
            .unwrap_or_default();

        let mut state = Self {
            user: Some(user),
            ..Self::default()
        };
        state.set_workspaces(workspaces);
        state
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Workspaces available for selection.
    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    /// The selected workspace.
    pub fn current_workspace(&self) -> Option<&Workspace> {
        let id = self.current?;
        self.workspaces.iter().find(|w| w.id == id)
    }

    /// Replace the workspace list.
    ///
    /// The selection survives if its workspace is still listed; otherwise
    /// the first workspace (or nothing) becomes current.
    pub fn set_workspaces(&mut self, workspaces: Vec<Workspace>) {
        self.workspaces = workspaces;
        let still_listed = self
            .current
            .is_some_and(|id| self.workspaces.iter().any(|w| w.id == id));
        if !still_listed {
            self.current = self.workspaces.first().map(|w| w.id);
        }
    }

    /// Select a listed workspace. Returns false, leaving the selection
    /// unchanged, if `id` is not listed.
    pub fn set_current_workspace(&mut self, id: Uuid) -> bool {
        if self.workspaces.iter().any(|w| w.id == id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }

    /// Add a freshly created workspace and select it.
    pub fn record_created(&mut self, workspace: Workspace) {
        let id = workspace.id;
        if !self.workspaces.iter().any(|w| w.id == id) {
            self.workspaces.push(workspace);
        }
        self.current = Some(id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::StaticAuth;
    use crate::store::MemoryWorkspaceStore;
    use std::sync::Arc;

    fn ws(name: &str) -> Workspace {
        Workspace {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    #[tokio::test]
    async fn test_initialize_anonymous_is_empty() {
        let store = Arc::new(MemoryWorkspaceStore::new());
        let service = WorkspaceService::new(Arc::new(StaticAuth::anonymous()), store);

        let state = DashboardState::initialize(&service).await;

        assert_eq!(state, DashboardState::default());
    }

    #[tokio::test]
    async fn test_initialize_loads_and_selects_first() {
        let user = User::new(Uuid::new_v4());
        let store = Arc::new(MemoryWorkspaceStore::new());
        let first = store.create_workspace_with_owner(&user, "First").await.unwrap();
        store.create_workspace_with_owner(&user, "Second").await.unwrap();
        let service =
            WorkspaceService::new(Arc::new(StaticAuth::signed_in(user.clone())), store);

        let state = DashboardState::initialize(&service).await;

        assert_eq!(state.user(), Some(&user));
        assert_eq!(state.workspaces().len(), 2);
        assert_eq!(state.current_workspace(), Some(&first));
    }

    #[tokio::test]
    async fn test_initialize_store_failure_keeps_user() {
        let user = User::new(Uuid::new_v4());
        let store = Arc::new(MemoryWorkspaceStore::new());
        store.fail_with("down").await;
        let service =
            WorkspaceService::new(Arc::new(StaticAuth::signed_in(user.clone())), store);

        let state = DashboardState::initialize(&service).await;

        assert_eq!(state.user(), Some(&user));
        assert!(state.workspaces().is_empty());
        assert!(state.current_workspace().is_none());
    }

    #[test]
    fn test_set_current_workspace_requires_listed() {
        let mut state = DashboardState::default();
        let a = ws("A");
        let b = ws("B");
        state.set_workspaces(vec![a.clone(), b.clone()]);

        assert!(state.set_current_workspace(b.id));
        assert_eq!(state.current_workspace(), Some(&b));

        assert!(!state.set_current_workspace(Uuid::new_v4()));
        assert_eq!(state.current_workspace(), Some(&b));
    }

    #[test]
    fn test_set_workspaces_keeps_or_resets_selection() {
        let mut state = DashboardState::default();
        let a = ws("A");
        let b = ws("B");
        let c = ws("C");
        state.set_workspaces(vec![a.clone(), b.clone()]);
        state.set_current_workspace(b.id);

        state.set_workspaces(vec![c.clone(), b.clone()]);
        assert_eq!(state.current_workspace(), Some(&b));

        state.set_workspaces(vec![c.clone(), a.clone()]);
        assert_eq!(state.current_workspace(), Some(&c));

        state.set_workspaces(vec![]);
        assert!(state.current_workspace().is_none());
    }

    #[test]
    fn test_record_created_selects_new() {
        let mut state = DashboardState::default();
        let a = ws("A");
        state.set_workspaces(vec![a.clone()]);

        let b = ws("B");
        state.record_created(b.clone());
        state.record_created(b.clone());

        assert_eq!(state.workspaces(), &[a, b.clone()]);
        assert_eq!(state.current_workspace(), Some(&b));
    }
}
