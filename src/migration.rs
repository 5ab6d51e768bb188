//! The per-record import loop.
//!
//! [`MigrationContext`] carries both stores and the run options. Nothing
//! here reads global state.

use crate::account_resolver::AccountResolver;
use crate::error::SkipReason;
use crate::identity_chain::resolve_identity;
use crate::path_resolver::resolve_uri;
use crate::rating_reconciler::{RatingReconciler, UpsertOutcome};
use crate::source_store::{SourceLibrary, SourceRating, SourceTrackRecord};
use crate::target_store::TargetLibrary;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub plex_account: String,
    pub dry_run: bool,
}

pub struct MigrationContext<S, T> {
    pub source: S,
    pub target: T,
    pub options: RunOptions,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Source records read.
    pub checked: usize,
    /// Records that made it through path and identity resolution.
    pub resolved: usize,
    pub applied: usize,
    pub unchanged: usize,
    pub dry_run: usize,
    pub skipped: usize,
    pub skips_by_reason: BTreeMap<SkipReason, usize>,
}

impl MigrationSummary {
    fn record_skip(&mut self, reason: SkipReason) {
        self.skipped += 1;
        *self.skips_by_reason.entry(reason).or_default() += 1;
    }

    fn record_outcome(&mut self, outcome: &UpsertOutcome) {
        self.resolved += 1;
        match outcome {
            UpsertOutcome::Applied(_) => self.applied += 1,
            UpsertOutcome::Unchanged => self.unchanged += 1,
            UpsertOutcome::DryRun(_) => self.dry_run += 1,
        }
    }

    pub fn log(&self) {
        info!("");
        info!("Import Summary");
        info!("==============");
        info!("Tracks checked: {}", self.checked);
        info!("Tracks matched in plex: {}", self.resolved);
        info!("Ratings written: {}", self.applied);
        info!("Ratings already up to date: {}", self.unchanged);
        if self.dry_run > 0 {
            info!("Ratings that would be written: {}", self.dry_run);
        }
        if self.skipped > 0 {
            warn!("Tracks skipped: {}", self.skipped);
            for (reason, count) in &self.skips_by_reason {
                warn!("  {}: {}", reason, count);
            }
        }
    }
}

/// What happened to a single source record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Skipped(SkipReason),
    Upserted(UpsertOutcome),
}

impl<S: SourceLibrary, T: TargetLibrary> MigrationContext<S, T> {
    pub fn new(source: S, target: T, options: RunOptions) -> Self {
        Self {
            source,
            target,
            options,
        }
    }

    fn account_resolver(&self) -> AccountResolver<'_> {
        AccountResolver::new(&self.options.plex_account)
    }

    /// Pre-flight check that the configured account exists.
    pub fn verify_account(&self) -> Result<()> {
        let account_id = self.account_resolver().resolve(&self.target)?;
        info!(
            "Importing ratings for plex account {} (id {})",
            self.options.plex_account, account_id
        );
        Ok(())
    }

    /// Runs the three resolution stages and the upsert for one record.
    ///
    /// Resolution failures come back as [`RecordOutcome::Skipped`]; database
    /// errors and a vanished account are returned as errors.
    pub fn process_record(
        &self,
        record: &SourceTrackRecord,
        reconciler: &RatingReconciler,
    ) -> Result<RecordOutcome> {
        let path = match resolve_uri(record.uri.as_deref()) {
            Ok(path) => path,
            Err(reason) => {
                warn!("{}: {:?}", reason, record.uri);
                return Ok(RecordOutcome::Skipped(reason));
            }
        };

        let rating = match SourceRating::try_from(record.rating) {
            Ok(rating) => rating,
            Err(reason) => {
                warn!("{}: {} has rating {:?}", reason, path, record.rating);
                return Ok(RecordOutcome::Skipped(reason));
            }
        };

        let guid = match resolve_identity(&self.target, &path)?.into_result() {
            Ok(guid) => guid,
            Err(reason) => {
                warn!("{}: cannot find {:?} in plex", reason, path.as_str());
                return Ok(RecordOutcome::Skipped(reason));
            }
        };

        let account_id = self.account_resolver().resolve(&self.target)?;
        let outcome = reconciler.upsert(&self.target, path.as_str(), &guid, account_id, rating)?;
        Ok(RecordOutcome::Upserted(outcome))
    }

    /// Imports every Banshee rating into Plex.
    pub fn run(&self) -> Result<MigrationSummary> {
        let reconciler = RatingReconciler::new(self.options.dry_run);
        if reconciler.is_dry_run() {
            info!("Dry run: no rating will be written");
        }
        info!("Updating ratings from banshee...");

        let tracks = self.source.tracks()?;
        let mut summary = MigrationSummary::default();
        for record in &tracks {
            summary.checked += 1;
            let outcome = self
                .process_record(record, &reconciler)
                .with_context(|| format!("Failed to import rating for {:?}", record.uri))?;
            match outcome {
                RecordOutcome::Skipped(reason) => summary.record_skip(reason),
                RecordOutcome::Upserted(outcome) => summary.record_outcome(&outcome),
            }
        }

        // Only records that reached the write step, skips excluded
        info!("Checked {} files", summary.resolved);
        Ok(summary)
    }
}
