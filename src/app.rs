use crate::config::AppConfig;
use crate::migration::{MigrationContext, MigrationSummary, RunOptions};
use crate::source_store::SqliteSourceLibrary;
use crate::target_store::SqliteTargetLibrary;
use anyhow::Result;
use tracing::info;

/// Opens both databases, checks the account and, when asked to, imports the
/// ratings.
///
/// Returns `Ok(None)` when `update_ratings` is off: the databases and the
/// account are still validated, but no record is read.
pub fn run_app(config: &AppConfig) -> Result<Option<MigrationSummary>> {
    let source = SqliteSourceLibrary::open(&config.banshee_db)?;
    let target = SqliteTargetLibrary::open(&config.plex_db)?;

    let ctx = MigrationContext::new(
        source,
        target,
        RunOptions {
            plex_account: config.plex_account.clone(),
            dry_run: config.dry_run,
        },
    );
    ctx.verify_account()?;

    if !config.update_ratings {
        info!("Nothing to do, pass --update-ratings to import ratings");
        return Ok(None);
    }

    let summary = ctx.run()?;
    summary.log();
    Ok(Some(summary))
}
