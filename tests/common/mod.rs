//! Common test infrastructure
//!
//! Builds Banshee and Plex database files on disk, plus the audio files the
//! Banshee uris point at. Tests should only import from this module.

mod constants;
mod fixtures;

pub use constants::*;
pub use fixtures::{plex_ratings, plex_ratings_dump, TestLibraries};
