use super::schema::BANSHEE_TABLES;
use super::{SourceLibrary, SourceTrackRecord};
use crate::error::DatabaseRole;
use crate::sqlite_persistence::{open_existing, validate_tables, AccessMode};
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

pub struct SqliteSourceLibrary {
    conn: Connection,
}

impl SqliteSourceLibrary {
    /// Opens a Banshee database read-only and checks its schema.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        info!("Opening banshee database at {:?}...", path);
        let conn = open_existing(path, AccessMode::ReadOnly)
            .context("Failed to open banshee database")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        validate_tables(&conn, DatabaseRole::Banshee, BANSHEE_TABLES)?;
        Ok(Self { conn })
    }
}

impl SourceLibrary for SqliteSourceLibrary {
    fn tracks(&self) -> Result<Vec<SourceTrackRecord>> {
        let mut stmt = self.conn.prepare("SELECT uri, rating FROM CoreTracks;")?;
        let tracks = stmt
            .query_map(params![], |row| {
                Ok(SourceTrackRecord {
                    uri: row.get("uri")?,
                    rating: row.get("rating")?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read banshee tracks")?;
        Ok(tracks)
    }
}
