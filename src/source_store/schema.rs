//! The slice of Banshee's schema this tool reads.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table};

/// One row per track in the Banshee library. `Uri` is a `file://` URI and
/// `Rating` is the 0..5 star rating.
pub const CORE_TRACKS_TABLE: Table = Table {
    name: "CoreTracks",
    columns: &[
        sqlite_column!("TrackID", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("Uri", &SqlType::Text),
        sqlite_column!(
            "Rating",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("0")
        ),
    ],
    indices: &[],
};

pub const BANSHEE_TABLES: &[Table] = &[CORE_TRACKS_TABLE];
