//! Error taxonomy.
//!
//! [`MigrationError`] covers the fatal configuration failures. [`SkipReason`]
//! is per record: the runner counts it and moves on to the next track.
//! SQLite failures travel as a plain `anyhow::Error` and abort the run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two databases an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseRole {
    Banshee,
    Plex,
}

impl fmt::Display for DatabaseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseRole::Banshee => write!(f, "banshee"),
            DatabaseRole::Plex => write!(f, "plex"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Cannot find {role} db at {path:?}")]
    MissingDatabase { role: DatabaseRole, path: PathBuf },

    #[error("{role} db path {path:?} is not a regular file")]
    NotAFile { role: DatabaseRole, path: PathBuf },

    #[error("plex account must be specified via --plex-account or in config file")]
    MissingAccount,

    #[error("Could not find user {0} in plex")]
    AccountNotFound(String),

    #[error("{database} db schema mismatch: {detail}")]
    SchemaMismatch {
        database: DatabaseRole,
        detail: String,
    },
}

/// The three hops of the plex identity chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainStage {
    Part,
    Item,
    Metadata,
}

impl fmt::Display for ChainStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainStage::Part => write!(f, "part"),
            ChainStage::Item => write!(f, "item"),
            ChainStage::Metadata => write!(f, "metadata"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Error)]
pub enum SkipReason {
    #[error("uri is missing")]
    MissingUri,

    #[error("uri is not valid percent-encoded UTF-8")]
    UndecodableUri,

    #[error("could not find file")]
    FileNotFound,

    #[error("cannot guess media type")]
    UnknownMediaType,

    #[error("path is not audio")]
    NotAudio,

    #[error("rating is outside 0..=5")]
    InvalidRating,

    #[error("no plex {0} row for path")]
    ChainMissing(ChainStage),
}
