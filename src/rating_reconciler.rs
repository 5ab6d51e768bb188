//! Converts Banshee ratings to the Plex scale and writes them idempotently.

use crate::source_store::SourceRating;
use crate::target_store::{AccountId, IdentityKey, RatingWrite, TargetLibrary, TargetRating};
use anyhow::Result;
use tracing::info;

/// Banshee stores 0..=5 stars, Plex stores 0.0..=10.0.
pub const RATING_SCALE_FACTOR: f64 = 2.0;

pub fn to_target_rating(source: SourceRating) -> TargetRating {
    TargetRating::clamped(f64::from(source.stars()) * RATING_SCALE_FACTOR)
}

#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    /// The stored rating already matched; nothing was planned or written.
    Unchanged,
    /// The write was executed.
    Applied(RatingWrite),
    /// The write was planned and logged but not executed.
    DryRun(RatingWrite),
}

pub struct RatingReconciler {
    dry_run: bool,
}

impl RatingReconciler {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Works out which statement, if any, brings the setting for
    /// (`guid`, `account_id`) to `rating`.
    pub fn plan<T: TargetLibrary + ?Sized>(
        &self,
        target: &T,
        guid: &IdentityKey,
        account_id: AccountId,
        rating: TargetRating,
    ) -> Result<Option<RatingWrite>> {
        Ok(match target.rating_setting(guid, account_id)? {
            Some(setting) if setting.rating == Some(rating.value()) => None,
            Some(setting) => Some(RatingWrite::Update {
                id: setting.id,
                account_id,
                rating,
            }),
            None => Some(RatingWrite::Insert {
                account_id,
                guid: guid.clone(),
                rating,
            }),
        })
    }

    /// Update-if-exists-else-insert of the rating for (`guid`, `account_id`).
    ///
    /// At most one statement is executed, and none in dry-run mode. `label`
    /// only appears in log lines.
    pub fn upsert<T: TargetLibrary + ?Sized>(
        &self,
        target: &T,
        label: &str,
        guid: &IdentityKey,
        account_id: AccountId,
        source_rating: SourceRating,
    ) -> Result<UpsertOutcome> {
        let rating = to_target_rating(source_rating);
        let Some(write) = self.plan(target, guid, account_id, rating)? else {
            return Ok(UpsertOutcome::Unchanged);
        };

        if self.dry_run {
            info!("Would execute {}\n{}", write.sql(), write.params_json());
            return Ok(UpsertOutcome::DryRun(write));
        }

        let changed = target.apply_rating_write(&write)?;
        if changed != 0 {
            info!("{} rating updated to {}", label, rating);
            Ok(UpsertOutcome::Applied(write))
        } else {
            // Lost a race with Plex writing the same value
            Ok(UpsertOutcome::Unchanged)
        }
    }
}
