//! Handler functions for `kontora workspace {create,list,can-create}`.

use kontora_core::Result;
use kontora_workspace::{
    AUTH_REQUIRED_MESSAGE, AuthProvider, DashboardState, QuotaService, Workspace,
    WorkspaceService, WorkspaceStore,
};
use serde::Serialize;
use uuid::Uuid;

use crate::output::{Outcome, to_json};

/// Create a workspace for the current user.
///
/// JSON mode prints the action envelope as-is.
pub async fn handle_create<A, S>(
    service: &WorkspaceService<A, S>,
    name: &str,
    json: bool,
) -> Result<Outcome>
where
    A: AuthProvider + ?Sized,
    S: WorkspaceStore + ?Sized,
{
    let result = service.create_workspace(name).await;
    let success = result.is_success();

    if json {
        return Ok(Outcome::with_status(to_json(&result)?, success));
    }

    let mut output = result.message.clone();
    if let Some(ws) = &result.data {
        output.push_str(&format!("\nid:   {}\nslug: {}", ws.id, ws.slug));
    }
    Ok(Outcome::with_status(output, success))
}

#[derive(Serialize)]
struct Listing<'a> {
    current: Option<Uuid>,
    workspaces: &'a [Workspace],
}

/// List the current user's workspaces, marking the selected one.
pub async fn handle_list<A, S>(service: &WorkspaceService<A, S>, json: bool) -> Result<Outcome>
where
    A: AuthProvider + ?Sized,
    S: WorkspaceStore + ?Sized,
{
    let state = DashboardState::initialize(service).await;
    if state.user().is_none() {
        return Ok(Outcome::failed(AUTH_REQUIRED_MESSAGE));
    }

    let current = state.current_workspace().map(|w| w.id);

    if json {
        let listing = Listing {
            current,
            workspaces: state.workspaces(),
        };
        return Ok(Outcome::ok(to_json(&listing)?));
    }

    if state.workspaces().is_empty() {
        return Ok(Outcome::ok("No workspaces."));
    }

    let lines: Vec<String> = state
        .workspaces()
        .iter()
        .map(|w| {
            let marker = if Some(w.id) == current { '*' } else { ' ' };
            format!("{marker} {}\t{}\t{}", w.id, w.slug, w.name)
        })
        .collect();
    Ok(Outcome::ok(lines.join("\n")))
}

#[derive(Serialize)]
struct QuotaAnswer<'a> {
    workspace_id: Uuid,
    kind: &'a str,
    allowed: bool,
}

/// Report whether a workspace may create another entity of `kind`.
///
/// A denial exits non-zero so scripts can branch on it.
pub async fn handle_can_create<S>(
    quota: &QuotaService<S>,
    workspace_id: Uuid,
    kind: &str,
    json: bool,
) -> Result<Outcome>
where
    S: WorkspaceStore + ?Sized,
{
    let allowed = quota.can_create_entity(workspace_id, kind).await;

    let output = if json {
        to_json(&QuotaAnswer {
            workspace_id,
            kind,
            allowed,
        })?
    } else if allowed {
        format!("yes: workspace {workspace_id} can create more {kind}")
    } else {
        format!("no: workspace {workspace_id} cannot create more {kind}")
    };
    Ok(Outcome::with_status(output, allowed))
}
