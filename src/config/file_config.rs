use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Optional TOML configuration. Every key mirrors a CLI flag.
///
/// ```toml
/// banshee_db = "/home/alice/.config/banshee-1/banshee.db"
/// plex_db = "/srv/plex/com.plexapp.plugins.library.db"
/// plex_account = "alice@example.com"
/// update_ratings = true
/// ```
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub banshee_db: Option<String>,
    pub plex_db: Option<String>,
    pub plex_account: Option<String>,
    pub update_ratings: Option<bool>,
    pub dry_run: Option<bool>,
    pub legacy_exit_status: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
