//! Postgres-backed workspace store.
//!
//! Visibility and atomicity live in the database (see
//! `migrations/0001_workspaces.sql`). Each call opens a transaction, sets
//! `app.current_user_id` for that transaction only, and issues its query;
//! row-level security does the filtering. Creation is a single call to
//! `create_workspace_with_owner`, which inserts the workspace, owner and
//! quota rows together.
//!
//! Database URLs may contain credentials and are never logged.

use std::time::Duration;

use async_trait::async_trait;
use kontora_core::{Error, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use super::WorkspaceStore;
use crate::model::{QuotaRecord, Tier, TierLimits, User, Workspace};

/// Schema, policies and the creation function.
pub const MIGRATION: &str = include_str!("../../migrations/0001_workspaces.sql");

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Workspace store over a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgWorkspaceStore {
    pool: PgPool,
    default_tier: Tier,
}

impl PgWorkspaceStore {
    /// Wrap an existing pool. New workspaces get free-tier quotas.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            default_tier: Tier::Free,
        }
    }

    /// Connect a pool of at most `max_connections` to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(url)
            .await
            .map_err(store_error)?;
        log::debug!("Connected workspace store pool (max {max_connections})");
        Ok(Self::new(pool))
    }

    /// Seed quotas of new workspaces from `tier`.
    pub fn with_default_tier(mut self, tier: Tier) -> Self {
        self.default_tier = tier;
        self
    }

    /// The underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the bundled schema. Safe to run repeatedly.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;
        log::info!("Workspace schema is up to date");
        Ok(())
    }

    /// Begin a transaction acting as `user_id` for row-level security.
    async fn begin_as(&self, user_id: Uuid) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;
        sqlx::query("SELECT set_config('app.current_user_id', $1, true)")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(store_error)?;
        Ok(tx)
    }
}

#[async_trait]
impl WorkspaceStore for PgWorkspaceStore {
    async fn create_workspace_with_owner(&self, owner: &User, name: &str) -> Result<Workspace> {
        let limits = TierLimits::for_tier(self.default_tier);
        let mut tx = self.begin_as(owner.id).await?;

        let workspace = sqlx::query_as::<_, Workspace>(
            "SELECT id, name, slug FROM create_workspace_with_owner($1, $2, $3, $4)",
        )
        .bind(name)
        .bind(limits.max_contacts)
        .bind(limits.max_deals)
        .bind(limits.max_users)
        .fetch_one(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        Ok(workspace)
    }

    async fn list_workspaces(&self, viewer: &User) -> Result<Vec<Workspace>> {
        let mut tx = self.begin_as(viewer.id).await?;

        // Unfiltered on purpose: the select policy decides what is visible.
        let rows = sqlx::query_as::<_, Workspace>(
            "SELECT id, name, slug FROM workspaces ORDER BY created_at, id",
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;
        Ok(rows)
    }

    async fn quota(&self, workspace_id: Uuid) -> Result<Option<QuotaRecord>> {
        sqlx::query_as::<_, QuotaRecord>(
            "SELECT workspace_id, current_contacts, max_contacts, current_deals, max_deals, \
             current_users, max_users \
             FROM workspace_quotas WHERE workspace_id = $1",
        )
        .bind(workspace_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)
    }
}

/// Convert a driver error into a store error.
///
/// Database-side errors keep the server's message verbatim (constraint
/// violations, exceptions raised by the creation function).
fn store_error(err: sqlx::Error) -> Error {
    match err.as_database_error() {
        Some(db) => Error::store(db.message()),
        None => Error::store(err.to_string()),
    }
}
