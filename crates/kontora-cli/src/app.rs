//! The `kontora` application: logging setup and command dispatch.

use std::sync::Arc;

use kontora_core::traits::ConfigProvider;
use kontora_core::{Error, Result};
use kontora_docs::DocsLibrary;
use kontora_workspace::{PgWorkspaceStore, QuotaService, StaticAuth, User, WorkspaceService};
use tracing::Instrument;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::cli::{CliArgs, Command, DbAction, DocsAction, WorkspaceAction};
use crate::config::KontoraConfig;
use crate::output::Outcome;
use crate::{config_handlers, docs_handlers, workspace_handlers};

// ============================================================================
// KontoraCli
// ============================================================================

/// The CLI application over a loaded [`KontoraConfig`].
pub struct KontoraCli {
    name: String,
    config: KontoraConfig,
    version: String,
}

impl KontoraCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = KontoraConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: KontoraConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// The loaded configuration.
    pub fn config(&self) -> &KontoraConfig {
        &self.config
    }

    /// Initialise tracing-based logging.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Logs go to stderr so stdout stays machine-readable.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("warn")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        };

        // A subscriber may already be installed (tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Run a command and print its output.
    pub async fn run(&self, args: CliArgs) -> Result<Outcome> {
        self.init_logging(args.verbose, args.quiet);

        let span = tracing::info_span!("kontora", user = ?args.user);
        let outcome = self.dispatch(args).instrument(span).await?;

        if !outcome.output.is_empty() {
            println!("{}", outcome.output);
        }
        Ok(outcome)
    }

    async fn dispatch(&self, args: CliArgs) -> Result<Outcome> {
        let json = args.json;
        match args.command {
            Some(Command::Version) => Ok(Outcome::ok(format!("{} {}", self.name, self.version))),
            Some(Command::Docs(cmd)) => self.handle_docs(cmd.command, json).await,
            Some(Command::Workspace(cmd)) => {
                self.handle_workspace(cmd.command, args.user, json).await
            }
            Some(Command::Db(cmd)) => match cmd.command {
                DbAction::Migrate => {
                    self.workspace_store().await?.migrate().await?;
                    Ok(Outcome::ok("Workspace schema is up to date."))
                }
            },
            Some(Command::Config(cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), cmd.command)?;
                Ok(Outcome::ok(String::new()))
            }
            None => Ok(Outcome::ok(format!(
                "{} {}; use --help for usage",
                self.name, self.version
            ))),
        }
    }

    async fn handle_docs(&self, action: DocsAction, json: bool) -> Result<Outcome> {
        let library = DocsLibrary::from_config(&self.config)?;
        log::debug!("Docs root: {}", library.root().display());

        match action {
            DocsAction::List => docs_handlers::handle_list(&library, json).await,
            DocsAction::Show { id } => docs_handlers::handle_show(&library, &id, json).await,
            DocsAction::Render { id } => docs_handlers::handle_render(&library, &id, json).await,
        }
    }

    async fn handle_workspace(
        &self,
        action: WorkspaceAction,
        user: Option<Uuid>,
        json: bool,
    ) -> Result<Outcome> {
        let store = Arc::new(self.workspace_store().await?);

        match action {
            WorkspaceAction::Create { name } => {
                let service = WorkspaceService::new(Arc::new(auth_for(user)), store);
                workspace_handlers::handle_create(&service, &name, json).await
            }
            WorkspaceAction::List => {
                let service = WorkspaceService::new(Arc::new(auth_for(user)), store);
                workspace_handlers::handle_list(&service, json).await
            }
            WorkspaceAction::CanCreate { workspace_id, kind } => {
                let quota = QuotaService::new(store);
                workspace_handlers::handle_can_create(&quota, workspace_id, &kind, json).await
            }
        }
    }

    async fn workspace_store(&self) -> Result<PgWorkspaceStore> {
        let url = self.config.database_url().ok_or_else(|| {
            Error::config("No database configured; set database.url or KONTORA_DATABASE_URL")
        })?;
        let store = PgWorkspaceStore::connect(url, self.config.database.max_connections).await?;
        Ok(store.with_default_tier(self.config.quota.default_tier))
    }
}

/// The caller for workspace commands: `--user` if given, else anonymous.
fn auth_for(user: Option<Uuid>) -> StaticAuth {
    match user {
        Some(id) => StaticAuth::signed_in(User::new(id)),
        None => StaticAuth::anonymous(),
    }
}

// ============================================================================
// Tests
// ============================================================================
