mod models;
mod schema;
mod sqlite_source_store;

pub use models::{SourceRating, SourceTrackRecord};
pub use schema::{BANSHEE_TABLES, CORE_TRACKS_TABLE};
pub use sqlite_source_store::SqliteSourceLibrary;

use anyhow::Result;

/// Read-only view over the library the ratings come from.
pub trait SourceLibrary {
    /// Returns every track with its uri and rating, in storage order.
    fn tracks(&self) -> Result<Vec<SourceTrackRecord>>;
}
