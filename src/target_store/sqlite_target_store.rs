use super::models::{AccountId, IdentityKey, RatingSetting, RatingWrite};
use super::schema::PLEX_TABLES;
use super::TargetLibrary;
use crate::error::DatabaseRole;
use crate::sqlite_persistence::{open_existing, validate_tables, AccessMode};
use anyhow::{Context, Result};
use rusqlite::{named_params, Connection, OptionalExtension};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteTargetLibrary {
    conn: Connection,
}

impl SqliteTargetLibrary {
    /// Opens a Plex library database for reading and writing and checks the
    /// tables the migration depends on.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        info!("Opening plex database at {:?}...", path);
        let conn =
            open_existing(path, AccessMode::ReadWrite).context("Failed to open plex database")?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        validate_tables(&conn, DatabaseRole::Plex, PLEX_TABLES)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TargetLibrary for SqliteTargetLibrary {
    fn media_item_id_for_file(&self, file: &str) -> Result<Option<i64>> {
        let media_item_id: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT media_item_id FROM media_parts WHERE file = :file LIMIT 1;",
                named_params! { ":file": file },
                |row| row.get(0),
            )
            .optional()?;
        Ok(media_item_id.flatten())
    }

    fn metadata_item_id_for_media_item(&self, media_item_id: i64) -> Result<Option<i64>> {
        let metadata_item_id: Option<Option<i64>> = self
            .conn
            .query_row(
                "SELECT metadata_item_id FROM media_items WHERE id = :id LIMIT 1;",
                named_params! { ":id": media_item_id },
                |row| row.get(0),
            )
            .optional()?;
        Ok(metadata_item_id.flatten())
    }

    fn guid_for_metadata_item(&self, metadata_item_id: i64) -> Result<Option<IdentityKey>> {
        let guid: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT guid FROM metadata_items WHERE id = :id LIMIT 1;",
                named_params! { ":id": metadata_item_id },
                |row| row.get(0),
            )
            .optional()?;
        Ok(guid.flatten().map(IdentityKey::new))
    }

    fn account_id_by_name(&self, name: &str) -> Result<Option<AccountId>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id FROM accounts WHERE name = :name LIMIT 1;",
                named_params! { ":name": name },
                |row| row.get(0).map(AccountId),
            )
            .optional()?)
    }

    fn rating_setting(
        &self,
        guid: &IdentityKey,
        account_id: AccountId,
    ) -> Result<Option<RatingSetting>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, rating FROM metadata_item_settings \
                 WHERE guid = :guid AND account_id = :account_id LIMIT 1;",
                named_params! { ":guid": guid.as_str(), ":account_id": account_id.0 },
                |row| {
                    Ok(RatingSetting {
                        id: row.get("id")?,
                        rating: row.get("rating")?,
                    })
                },
            )
            .optional()?)
    }

    fn apply_rating_write(&self, write: &RatingWrite) -> Result<usize> {
        debug!("Executing {} {}", write.sql(), write.params_json());
        let changed = match write {
            RatingWrite::Update {
                id,
                account_id,
                rating,
            } => self.conn.execute(
                write.sql(),
                named_params! {
                    ":id": id,
                    ":account_id": account_id.0,
                    ":rating": rating.value(),
                },
            ),
            RatingWrite::Insert {
                account_id,
                guid,
                rating,
            } => self.conn.execute(
                write.sql(),
                named_params! {
                    ":account_id": account_id.0,
                    ":guid": guid.as_str(),
                    ":rating": rating.value(),
                },
            ),
        }
        .context("Failed to write plex rating")?;
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target_store::TargetRating;

    fn create_test_library() -> SqliteTargetLibrary {
        let conn = Connection::open_in_memory().unwrap();
        for table in PLEX_TABLES {
            table.create(&conn).unwrap();
        }
        conn.execute_batch(
            "INSERT INTO metadata_items (id, guid) VALUES (10, 'abc-123');
             INSERT INTO metadata_items (id, guid) VALUES (11, NULL);
             INSERT INTO media_items (id, metadata_item_id) VALUES (20, 10);
             INSERT INTO media_items (id, metadata_item_id) VALUES (21, NULL);
             INSERT INTO media_parts (id, media_item_id, file) VALUES (30, 20, '/music/song.mp3');
             INSERT INTO media_parts (id, media_item_id, file) VALUES (31, 21, '/music/other.mp3');
             INSERT INTO accounts (id, name) VALUES (7, 'alice@example.com');",
        )
        .unwrap();
        SqliteTargetLibrary::from_connection(conn).unwrap()
    }

    #[test]
    fn walks_each_hop() {
        let library = create_test_library();
        assert_eq!(
            library.media_item_id_for_file("/music/song.mp3").unwrap(),
            Some(20)
        );
        assert_eq!(
            library.metadata_item_id_for_media_item(20).unwrap(),
            Some(10)
        );
        assert_eq!(
            library.guid_for_metadata_item(10).unwrap(),
            Some(IdentityKey::new("abc-123"))
        );
    }

    #[test]
    fn null_links_read_as_absent() {
        let library = create_test_library();
        assert_eq!(library.metadata_item_id_for_media_item(21).unwrap(), None);
        assert_eq!(library.guid_for_metadata_item(11).unwrap(), None);
        assert_eq!(library.metadata_item_id_for_media_item(99).unwrap(), None);
    }

    #[test]
    fn file_match_is_exact() {
        let library = create_test_library();
        assert_eq!(
            library.media_item_id_for_file("/music/SONG.mp3").unwrap(),
            None
        );
        assert_eq!(
            library.media_item_id_for_file("/music/song.mp3 ").unwrap(),
            None
        );
    }

    #[test]
    fn duplicate_parts_resolve_to_first_match() {
        let library = create_test_library();
        library
            .connection()
            .execute(
                "INSERT INTO media_parts (id, media_item_id, file) VALUES (32, 21, '/music/song.mp3')",
                [],
            )
            .unwrap();
        assert_eq!(
            library.media_item_id_for_file("/music/song.mp3").unwrap(),
            Some(20)
        );
    }

    #[test]
    fn finds_account_by_name() {
        let library = create_test_library();
        assert_eq!(
            library.account_id_by_name("alice@example.com").unwrap(),
            Some(AccountId(7))
        );
        assert_eq!(library.account_id_by_name("bob@example.com").unwrap(), None);
    }

    #[test]
    fn insert_then_update_rating_setting() {
        let library = create_test_library();
        let guid = IdentityKey::new("abc-123");
        assert_eq!(library.rating_setting(&guid, AccountId(7)).unwrap(), None);

        let changed = library
            .apply_rating_write(&RatingWrite::Insert {
                account_id: AccountId(7),
                guid: guid.clone(),
                rating: TargetRating::new(6.0).unwrap(),
            })
            .unwrap();
        assert_eq!(changed, 1);

        let setting = library.rating_setting(&guid, AccountId(7)).unwrap().unwrap();
        assert_eq!(setting.rating, Some(6.0));

        let changed = library
            .apply_rating_write(&RatingWrite::Update {
                id: setting.id,
                account_id: AccountId(7),
                rating: TargetRating::new(8.0).unwrap(),
            })
            .unwrap();
        assert_eq!(changed, 1);
        let setting = library.rating_setting(&guid, AccountId(7)).unwrap().unwrap();
        assert_eq!(setting.rating, Some(8.0));

        // Same value again: the guard in the UPDATE leaves the row alone
        let changed = library
            .apply_rating_write(&RatingWrite::Update {
                id: setting.id,
                account_id: AccountId(7),
                rating: TargetRating::new(8.0).unwrap(),
            })
            .unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn settings_are_isolated_per_account() {
        let library = create_test_library();
        let guid = IdentityKey::new("abc-123");
        library
            .apply_rating_write(&RatingWrite::Insert {
                account_id: AccountId(7),
                guid: guid.clone(),
                rating: TargetRating::new(4.0).unwrap(),
            })
            .unwrap();
        assert!(library.rating_setting(&guid, AccountId(8)).unwrap().is_none());
    }
}
