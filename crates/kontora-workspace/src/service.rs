//! Workspace creation and listing.
//!
//! Both flows resolve the caller through the [`AuthProvider`] and talk to
//! the [`WorkspaceStore`] exactly once. Neither ever returns an error to
//! its caller: creation answers with an [`ActionResult`], listing with
//! `None` when nothing can be shown.

use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::envelope::ActionResult;
use crate::model::{User, Workspace};
use crate::store::WorkspaceStore;
use crate::validation::validate_workspace_name;

/// Message returned when an action needs a signed-in user.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required.";

/// Creates and lists workspaces on behalf of the current user.
pub struct WorkspaceService<A: ?Sized, S: ?Sized> {
    auth: Arc<A>,
    store: Arc<S>,
}

impl<A: ?Sized, S: ?Sized> Clone for WorkspaceService<A, S> {
    fn clone(&self) -> Self {
        Self {
            auth: Arc::clone(&self.auth),
            store: Arc::clone(&self.store),
        }
    }
}

impl<A, S> WorkspaceService<A, S>
where
    A: AuthProvider + ?Sized,
    S: WorkspaceStore + ?Sized,
{
    /// Create a service over the given collaborators.
    pub fn new(auth: Arc<A>, store: Arc<S>) -> Self {
        Self { auth, store }
    }

    /// The store this service writes to.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// The signed-in user, or `None`.
    ///
    /// A failing auth provider is logged and treated as anonymous.
    pub async fn current_user(&self) -> Option<User> {
        match self.auth.current_user().await {
            Ok(user) => user,
            Err(e) => {
                log::error!("Could not resolve current user: {e}");
                None
            }
        }
    }

    /// Create a workspace owned by the current user.
    pub async fn create_workspace(&self, requested_name: &str) -> ActionResult<Workspace> {
        let user = self.current_user().await;
        self.create_workspace_as(user.as_ref(), requested_name).await
    }

    /// Create a workspace owned by `user`.
    ///
    /// - no user: authentication error, the store is not called;
    /// - invalid name: the validation message;
    /// - store failure: the store's message, unchanged.
    pub async fn create_workspace_as(
        &self,
        user: Option<&User>,
        requested_name: &str,
    ) -> ActionResult<Workspace> {
        let Some(user) = user else {
            log::warn!("Workspace creation attempted without an authenticated user");
            return ActionResult::failure(AUTH_REQUIRED_MESSAGE);
        };

        let name = match validate_workspace_name(requested_name) {
            Ok(name) => name,
            Err(e) => return ActionResult::failure(e.to_string()),
        };

        match self.store.create_workspace_with_owner(user, &name).await {
            Ok(workspace) => {
                log::info!(
                    "Created workspace {} ({}) for user {}",
                    workspace.id,
                    workspace.slug,
                    user.id
                );
                let message = format!("Воркспейс \"{}\" успішно створено!", workspace.name);
                ActionResult::success(message, workspace)
            }
            Err(e) => {
                log::error!("Workspace creation failed for user {}: {e}", user.id);
                ActionResult::failure(e.to_string())
            }
        }
    }

    /// Workspaces visible to the current user.
    pub async fn list_workspaces(&self) -> Option<Vec<Workspace>> {
        let user = self.current_user().await;
        self.list_workspaces_as(user.as_ref()).await
    }

    /// Workspaces visible to `user`.
    ///
    /// `None` means "show the empty state": there is no user, or the store
    /// failed. Visibility filtering is left entirely to the store.
    pub async fn list_workspaces_as(&self, user: Option<&User>) -> Option<Vec<Workspace>> {
        let Some(user) = user else {
            log::warn!("Workspace listing requested without an authenticated user");
            return None;
        };

        match self.store.list_workspaces(user).await {
            Ok(workspaces) => Some(workspaces),
            Err(e) => {
                log::error!("Listing workspaces failed for user {}: {e}", user.id);
                None
            }
        }
    }
}
