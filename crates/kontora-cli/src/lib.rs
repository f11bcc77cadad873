//! Command-line front end for Kontora.
//!
//! # Key Abstractions
//!
//! - [`KontoraCli`]: loads configuration, installs logging, dispatches commands
//! - [`KontoraConfig`]: file + env layered configuration
//! - [`Outcome`]: printed output plus a success flag for the exit code

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod docs_handlers;
pub mod output;
pub mod workspace_handlers;

pub use app::KontoraCli;
pub use cli::CliArgs;
pub use config::KontoraConfig;
pub use output::Outcome;
