#![allow(dead_code)]

use super::constants::*;
use anyhow::Result;
use banshee2plex::config::{AppConfig, CliConfig};
use banshee2plex::source_store::BANSHEE_TABLES;
use banshee2plex::target_store::PLEX_TABLES;
use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A Banshee database, a Plex database and a music directory inside one
/// temporary directory. Dropping it removes everything.
pub struct TestLibraries {
    pub dir: TempDir,
    pub banshee_db: PathBuf,
    pub plex_db: PathBuf,
    pub music_dir: PathBuf,
    next_plex_id: i64,
}

impl TestLibraries {
    /// Empty libraries with both plex accounts present.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let music_dir = dir.path().join("music");
        fs::create_dir_all(&music_dir)?;

        let banshee_db = dir.path().join("banshee.db");
        let conn = Connection::open(&banshee_db)?;
        for table in BANSHEE_TABLES {
            table.create(&conn)?;
        }

        let plex_db = dir.path().join("com.plexapp.plugins.library.db");
        let conn = Connection::open(&plex_db)?;
        for table in PLEX_TABLES {
            table.create(&conn)?;
        }
        conn.execute(
            "INSERT INTO accounts (id, name) VALUES (?1, ?2), (?3, ?4)",
            params![PLEX_ACCOUNT_ID, PLEX_ACCOUNT, OTHER_ACCOUNT_ID, OTHER_ACCOUNT],
        )?;

        Ok(Self {
            dir,
            banshee_db,
            plex_db,
            music_dir,
            next_plex_id: 100,
        })
    }

    /// Writes a fake audio file under the music directory and returns its
    /// absolute path.
    pub fn add_file(&self, relative: &str) -> Result<PathBuf> {
        let path = self.music_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, b"ID3\x03\x00\x00\x00\x00\x00\x00")?;
        Ok(path)
    }

    /// Adds a Banshee track pointing at `path`, percent-encoding spaces the
    /// way Banshee does.
    pub fn add_banshee_track(&self, path: &Path, rating: i64) -> Result<()> {
        let uri = format!("file://{}", path.display()).replace(' ', "%20");
        self.add_banshee_uri(Some(&uri), rating)
    }

    pub fn add_banshee_uri(&self, uri: Option<&str>, rating: i64) -> Result<()> {
        let conn = Connection::open(&self.banshee_db)?;
        conn.execute(
            "INSERT INTO CoreTracks (Uri, Rating) VALUES (?1, ?2)",
            params![uri, rating],
        )?;
        Ok(())
    }

    /// Adds the full part → item → metadata chain for `path`.
    pub fn add_plex_track(&mut self, path: &Path, guid: &str) -> Result<()> {
        let metadata_id = self.next_plex_id;
        let media_item_id = metadata_id + 1;
        self.next_plex_id += 10;

        let conn = Connection::open(&self.plex_db)?;
        conn.execute(
            "INSERT INTO metadata_items (id, guid) VALUES (?1, ?2)",
            params![metadata_id, guid],
        )?;
        conn.execute(
            "INSERT INTO media_items (id, metadata_item_id) VALUES (?1, ?2)",
            params![media_item_id, metadata_id],
        )?;
        conn.execute(
            "INSERT INTO media_parts (media_item_id, file) VALUES (?1, ?2)",
            params![media_item_id, path.to_string_lossy().into_owned()],
        )?;
        Ok(())
    }

    pub fn plex(&self) -> Result<Connection> {
        Ok(Connection::open(&self.plex_db)?)
    }

    pub fn cli_config(&self) -> CliConfig {
        CliConfig {
            banshee_db: Some(self.banshee_db.clone()),
            plex_db: Some(self.plex_db.clone()),
            plex_account: Some(PLEX_ACCOUNT.to_string()),
            update_ratings: true,
            ..Default::default()
        }
    }

    pub fn config(&self) -> AppConfig {
        AppConfig::resolve(&self.cli_config(), None).expect("valid test config")
    }

    pub fn dry_run_config(&self) -> AppConfig {
        let mut cli = self.cli_config();
        cli.dry_run = true;
        AppConfig::resolve(&cli, None).expect("valid test config")
    }
}

/// Every rating row as (guid, account_id, rating), ordered by row id.
pub fn plex_ratings(plex_db: &Path) -> Result<Vec<(String, i64, Option<f64>)>> {
    let conn = Connection::open(plex_db)?;
    let mut stmt =
        conn.prepare("SELECT guid, account_id, rating FROM metadata_item_settings ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// The ratings table dumped as text, including row ids, so two snapshots can
/// be compared for exact equality.
pub fn plex_ratings_dump(plex_db: &Path) -> Result<String> {
    let conn = Connection::open(plex_db)?;
    let mut stmt = conn.prepare(
        "SELECT quote(id), quote(account_id), quote(guid), quote(rating) \
         FROM metadata_item_settings ORDER BY id",
    )?;
    let rows = stmt
        .query_map([], |row| {
            Ok(format!(
                "{}|{}|{}|{}",
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.join("\n"))
}
