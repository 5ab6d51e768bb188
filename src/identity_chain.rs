//! Resolves a file path to the Plex guid that ratings are keyed by.

use crate::error::{ChainStage, SkipReason};
use crate::path_resolver::CanonicalPath;
use crate::target_store::{IdentityKey, TargetLibrary};
use anyhow::Result;
use tracing::debug;

/// Outcome of walking `media_parts` → `media_items` → `metadata_items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityResolution {
    Resolved(IdentityKey),
    /// The hop at `stage` found no row. The ids gathered before it are kept
    /// for the log line.
    Missing {
        stage: ChainStage,
        media_item_id: Option<i64>,
        metadata_item_id: Option<i64>,
    },
}

impl IdentityResolution {
    fn missing(
        stage: ChainStage,
        media_item_id: Option<i64>,
        metadata_item_id: Option<i64>,
    ) -> Self {
        IdentityResolution::Missing {
            stage,
            media_item_id,
            metadata_item_id,
        }
    }

    pub fn into_result(self) -> Result<IdentityKey, SkipReason> {
        match self {
            IdentityResolution::Resolved(guid) => Ok(guid),
            IdentityResolution::Missing { stage, .. } => Err(SkipReason::ChainMissing(stage)),
        }
    }
}

/// Walks the three hops for `path`.
///
/// A hop that finds nothing yields [`IdentityResolution::Missing`]; only
/// database failures are returned as errors.
pub fn resolve_identity<T: TargetLibrary + ?Sized>(
    target: &T,
    path: &CanonicalPath,
) -> Result<IdentityResolution> {
    let Some(media_item_id) = target.media_item_id_for_file(path.as_str())? else {
        return Ok(IdentityResolution::missing(ChainStage::Part, None, None));
    };

    let Some(metadata_item_id) = target.metadata_item_id_for_media_item(media_item_id)? else {
        return Ok(IdentityResolution::missing(
            ChainStage::Item,
            Some(media_item_id),
            None,
        ));
    };

    let Some(guid) = target.guid_for_metadata_item(metadata_item_id)? else {
        return Ok(IdentityResolution::missing(
            ChainStage::Metadata,
            Some(media_item_id),
            Some(metadata_item_id),
        ));
    };

    debug!(
        "{} -> media item {} -> metadata item {} -> {}",
        path, media_item_id, metadata_item_id, guid
    );
    Ok(IdentityResolution::Resolved(guid))
}
