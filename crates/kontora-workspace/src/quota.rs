//! Quota gating for contacts, deals and users.
//!
//! Every path that cannot prove there is room answers `false`: a missing
//! quota record, an unknown entity kind, and a failed read all deny.
//! Checks only read.

use std::sync::Arc;

use uuid::Uuid;

use crate::model::{EntityKind, within_limit};
use crate::store::WorkspaceStore;

/// Decides whether a workspace may create another entity.
pub struct QuotaService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ?Sized> Clone for QuotaService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: WorkspaceStore + ?Sized> QuotaService<S> {
    /// Create a quota service reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Gate on an entity kind given by name (`contacts`, `deals`, `users`).
    pub async fn can_create_entity(&self, workspace_id: Uuid, kind: &str) -> bool {
        match kind.parse::<EntityKind>() {
            Ok(kind) => self.can_create(workspace_id, kind).await,
            Err(e) => {
                log::warn!("Quota check for workspace {workspace_id} denied: {e}");
                false
            }
        }
    }

    /// Gate on a typed entity kind.
    pub async fn can_create(&self, workspace_id: Uuid, kind: EntityKind) -> bool {
        let record = match self.store.quota(workspace_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                log::warn!("No quota record for workspace {workspace_id}; denying {kind}");
                return false;
            }
            Err(e) => {
                log::error!("Quota read for workspace {workspace_id} failed; denying {kind}: {e}");
                return false;
            }
        };

        let usage = record.usage(kind);
        let allowed = within_limit(usage.current, usage.max);
        log::debug!(
            "Quota {kind} for workspace {workspace_id}: {}/{} -> {}",
            usage.current,
            usage.max,
            if allowed { "allow" } else { "deny" }
        );
        allowed
    }
}
