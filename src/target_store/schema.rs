//! The slice of the Plex library schema this tool touches.
//!
//! Plex's own tables carry many more columns; only the ones read or written
//! here are declared, and startup validation checks just those.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table};

pub const METADATA_ITEMS_TABLE: Table = Table {
    name: "metadata_items",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("guid", &SqlType::Text),
    ],
    indices: &[("index_metadata_items_on_guid", "guid")],
};

pub const MEDIA_ITEMS_TABLE: Table = Table {
    name: "media_items",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "metadata_item_id",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "metadata_items",
                foreign_column: "id",
            })
        ),
    ],
    indices: &[("index_media_items_on_metadata_item_id", "metadata_item_id")],
};

pub const MEDIA_PARTS_TABLE: Table = Table {
    name: "media_parts",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "media_item_id",
            &SqlType::Integer,
            foreign_key = Some(&ForeignKey {
                foreign_table: "media_items",
                foreign_column: "id",
            })
        ),
        sqlite_column!("file", &SqlType::Text),
    ],
    indices: &[("index_media_parts_on_file", "file")],
};

pub const ACCOUNTS_TABLE: Table = Table {
    name: "accounts",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text),
    ],
    indices: &[("index_accounts_on_name", "name")],
};

/// Per-account settings for a metadata item, keyed by the item's guid rather
/// than its row id.
pub const METADATA_ITEM_SETTINGS_TABLE: Table = Table {
    name: "metadata_item_settings",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("account_id", &SqlType::Integer),
        sqlite_column!("guid", &SqlType::Text),
        sqlite_column!("rating", &SqlType::Real),
    ],
    indices: &[
        ("index_metadata_item_settings_on_guid", "guid"),
        ("index_metadata_item_settings_on_account_id", "account_id"),
    ],
};

/// In creation order: referenced tables come first.
pub const PLEX_TABLES: &[Table] = &[
    METADATA_ITEMS_TABLE,
    MEDIA_ITEMS_TABLE,
    MEDIA_PARTS_TABLE,
    ACCOUNTS_TABLE,
    METADATA_ITEM_SETTINGS_TABLE,
];
