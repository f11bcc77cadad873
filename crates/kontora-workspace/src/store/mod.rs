//! The workspace store seam.
//!
//! The store owns everything the application deliberately does not:
//! atomic creation of a workspace with its owner, slug generation and
//! uniqueness, and the visibility rules deciding which workspaces a caller
//! may see. Services call it once per operation and never filter its
//! results themselves.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use kontora_core::Result;
use uuid::Uuid;

use crate::model::{QuotaRecord, User, Workspace};

pub use memory::MemoryWorkspaceStore;
pub use postgres::{MIGRATION, PgWorkspaceStore};

/// Persistence for workspaces and their quota counters.
///
/// Implementations report failures as [`kontora_core::Error::Store`]
/// carrying the backend's own message.
#[async_trait]
pub trait WorkspaceStore: Send + Sync {
    /// Create a workspace named `name` with `owner` as its sole owner.
    ///
    /// Both rows become visible together or not at all.
    async fn create_workspace_with_owner(&self, owner: &User, name: &str) -> Result<Workspace>;

    /// Every workspace `viewer` may see.
    async fn list_workspaces(&self, viewer: &User) -> Result<Vec<Workspace>>;

    /// Quota counters for a workspace, if tracking has been initialised.
    async fn quota(&self, workspace_id: Uuid) -> Result<Option<QuotaRecord>>;
}

#[async_trait]
impl<S: WorkspaceStore + ?Sized> WorkspaceStore for Arc<S> {
    async fn create_workspace_with_owner(&self, owner: &User, name: &str) -> Result<Workspace> {
        (**self).create_workspace_with_owner(owner, name).await
    }

    async fn list_workspaces(&self, viewer: &User) -> Result<Vec<Workspace>> {
        (**self).list_workspaces(viewer).await
    }

    async fn quota(&self, workspace_id: Uuid) -> Result<Option<QuotaRecord>> {
        (**self).quota(workspace_id).await
    }
}

/// Base slug for a workspace name.
///
/// Lowercases, keeps ASCII letters and digits, and collapses every other
/// run of characters into a single `-`. Falls back to `workspace` when
/// nothing survives. Matches the slug rule of the bundled SQL migration.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "workspace".to_string()
    } else {
        slug
    }
}
