mod file_config;

pub use file_config::FileConfig;

use crate::error::{DatabaseRole, MigrationError};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Where a system-wide Plex Media Server on Linux keeps its library.
pub const DEFAULT_PLEX_DB: &str = "/var/lib/plexmediaserver/Library/Application Support/\
Plex Media Server/Plug-in Support/Databases/com.plexapp.plugins.library.db";

/// Banshee's database under the user's home directory.
pub fn default_banshee_db() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .join(".config")
        .join("banshee-1")
        .join("banshee.db")
}

/// The CLI arguments that take part in config resolution.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub banshee_db: Option<PathBuf>,
    pub plex_db: Option<PathBuf>,
    pub plex_account: Option<String>,
    pub update_ratings: bool,
    pub dry_run: bool,
    pub legacy_exit_status: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub banshee_db: PathBuf,
    pub plex_db: PathBuf,
    pub plex_account: String,
    pub update_ratings: bool,
    pub dry_run: bool,
    /// Exit with status 1 even after a successful run, as older releases did.
    pub legacy_exit_status: bool,
}

impl AppConfig {
    /// Resolves configuration from CLI arguments and an optional TOML file.
    ///
    /// Explicit CLI values win over the file, the file wins over built-in
    /// defaults. A switch is on when either source turns it on. Both database
    /// files must already exist; nothing is opened here.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let banshee_db = cli
            .banshee_db
            .clone()
            .or_else(|| file.banshee_db.map(PathBuf::from))
            .unwrap_or_else(default_banshee_db);
        let plex_db = cli
            .plex_db
            .clone()
            .or_else(|| file.plex_db.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLEX_DB));

        check_database_file(DatabaseRole::Banshee, &banshee_db)?;
        check_database_file(DatabaseRole::Plex, &plex_db)?;

        let plex_account = cli
            .plex_account
            .clone()
            .or(file.plex_account)
            .filter(|a| !a.trim().is_empty())
            .ok_or(MigrationError::MissingAccount)?;

        Ok(AppConfig {
            banshee_db,
            plex_db,
            plex_account,
            update_ratings: cli.update_ratings || file.update_ratings.unwrap_or(false),
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            legacy_exit_status: cli.legacy_exit_status || file.legacy_exit_status.unwrap_or(false),
        })
    }
}

fn check_database_file(role: DatabaseRole, path: &Path) -> Result<(), MigrationError> {
    if !path.exists() {
        return Err(MigrationError::MissingDatabase {
            role,
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(MigrationError::NotAFile {
            role,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}
