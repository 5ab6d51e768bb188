#![allow(dead_code)]

pub const PLEX_ACCOUNT: &str = "alice@example.com";
pub const PLEX_ACCOUNT_ID: i64 = 7;
pub const OTHER_ACCOUNT: &str = "bob@example.com";
pub const OTHER_ACCOUNT_ID: i64 = 8;

pub const SONG_GUID: &str = "abc-123";
pub const SECOND_SONG_GUID: &str = "def-456";
