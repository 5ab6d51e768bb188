mod models;
mod schema;
mod sqlite_target_store;

pub use models::*;
pub use schema::*;
pub use sqlite_target_store::SqliteTargetLibrary;

use anyhow::Result;

/// The Plex library: lookups along the part → item → metadata chain, account
/// lookup, and the rating settings the migration writes.
///
/// Every lookup is a single-row equality match. When several rows match, the
/// first one wins.
pub trait TargetLibrary {
    /// Returns the owning media item of the part whose `file` equals `file`
    /// byte-for-byte, or Ok(None) if there is no such part.
    fn media_item_id_for_file(&self, file: &str) -> Result<Option<i64>>;

    /// Returns the metadata item a media item belongs to.
    fn metadata_item_id_for_media_item(&self, media_item_id: i64) -> Result<Option<i64>>;

    /// Returns the guid of a metadata item.
    fn guid_for_metadata_item(&self, metadata_item_id: i64) -> Result<Option<IdentityKey>>;

    /// Returns the id of the account with the given name.
    fn account_id_by_name(&self, name: &str) -> Result<Option<AccountId>>;

    fn rating_setting(
        &self,
        guid: &IdentityKey,
        account_id: AccountId,
    ) -> Result<Option<RatingSetting>>;

    /// Executes `write` and returns the number of rows it changed.
    fn apply_rating_write(&self, write: &RatingWrite) -> Result<usize>;
}
