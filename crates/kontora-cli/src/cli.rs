//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use uuid::Uuid;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "kontora", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "KONTORA_CONFIG", global = true)]
    pub config: Option<String>,

    /// Act as this user id for workspace commands.
    #[arg(short, long, env = "KONTORA_USER", global = true)]
    pub user: Option<Uuid>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Documentation library operations.
    Docs(DocsCommand),

    /// Workspace operations.
    Workspace(WorkspaceCommand),

    /// Database operations.
    Db(DbCommand),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

// ============================================================================
// Docs
// ============================================================================

/// Docs-specific subcommands.
#[derive(Parser, Debug)]
pub struct DocsCommand {
    /// Docs subcommand to execute.
    #[command(subcommand)]
    pub command: DocsAction,
}

/// Available docs subcommands.
#[derive(Subcommand, Debug)]
pub enum DocsAction {
    /// List document identifiers.
    List,

    /// Show a document's title and front-matter.
    Show {
        /// Document identifier (directory name).
        id: String,
    },

    /// Render a document to HTML.
    Render {
        /// Document identifier (directory name).
        id: String,
    },
}

// ============================================================================
// Workspace
// ============================================================================

/// Workspace-specific subcommands.
#[derive(Parser, Debug)]
pub struct WorkspaceCommand {
    /// Workspace subcommand to execute.
    #[command(subcommand)]
    pub command: WorkspaceAction,
}

/// Available workspace subcommands.
#[derive(Subcommand, Debug)]
pub enum WorkspaceAction {
    /// Create a workspace owned by the current user.
    Create {
        /// Display name.
        name: String,
    },

    /// List workspaces visible to the current user.
    List,

    /// Check whether a workspace has room for another entity.
    CanCreate {
        /// Workspace id.
        workspace_id: Uuid,

        /// Entity kind: contacts, deals, or users.
        kind: String,
    },
}

// ============================================================================
// Db
// ============================================================================

/// Database subcommands.
#[derive(Parser, Debug)]
pub struct DbCommand {
    /// Database subcommand to execute.
    #[command(subcommand)]
    pub command: DbAction,
}

/// Available database subcommands.
#[derive(Subcommand, Debug)]
pub enum DbAction {
    /// Apply the workspace schema.
    Migrate,
}

// ============================================================================
// Config
// ============================================================================

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "database.max_connections").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "quota.default_tier").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
