//! Workspace management for Kontora.
//!
//! # Modules
//!
//! - [`model`]: Users, workspaces, quota records, tiers
//! - [`validation`]: Workspace name rules
//! - [`envelope`]: The `ActionResult` envelope returned to UI callers
//! - [`auth`]: The authentication collaborator
//! - [`store`]: The store seam and its Postgres / in-memory backends
//! - [`service`]: Workspace creation and listing
//! - [`quota`]: Quota gating
//! - [`dashboard`]: Explicit dashboard selection state

#![doc = include_str!("../README.md")]

pub mod auth;
pub mod dashboard;
pub mod envelope;
pub mod model;
pub mod quota;
pub mod service;
pub mod store;
pub mod validation;

pub use auth::{AuthProvider, StaticAuth};
pub use dashboard::DashboardState;
pub use envelope::ActionResult;
pub use model::{EntityKind, QuotaRecord, Tier, TierLimits, Usage, User, Workspace, within_limit};
pub use quota::QuotaService;
pub use service::{AUTH_REQUIRED_MESSAGE, WorkspaceService};
pub use store::{MemoryWorkspaceStore, PgWorkspaceStore, WorkspaceStore};
pub use validation::{NameError, validate_workspace_name};
