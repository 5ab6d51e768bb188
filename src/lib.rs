//! Banshee to Plex rating import.
//!
//! This library exposes the internal modules for testing and reuse by the
//! `banshee2plex` binary.

pub mod account_resolver;
pub mod app;
pub mod cli_style;
pub mod config;
pub mod error;
pub mod identity_chain;
pub mod migration;
pub mod path_resolver;
pub mod rating_reconciler;
pub mod source_store;
pub mod sqlite_persistence;
pub mod target_store;

// Re-export commonly used types for convenience
pub use app::run_app;
pub use config::{AppConfig, CliConfig, FileConfig};
pub use error::{ChainStage, MigrationError, SkipReason};
pub use migration::{MigrationContext, MigrationSummary, RunOptions};
pub use source_store::{SourceLibrary, SqliteSourceLibrary};
pub use target_store::{SqliteTargetLibrary, TargetLibrary};
