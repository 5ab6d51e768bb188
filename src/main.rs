use anyhow::{Context, Result};
use banshee2plex::cli_style::get_styles;
use banshee2plex::config::{AppConfig, CliConfig, FileConfig};
use banshee2plex::run_app;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(
    name = "banshee2plex",
    about = "Import banshee data into Plex",
    version = env!("LONG_VERSION"),
    styles = get_styles()
)]
struct CliArgs {
    /// Path to the banshee DB. Defaults to ~/.config/banshee-1/banshee.db.
    #[clap(long, value_parser = parse_path)]
    pub banshee_db: Option<PathBuf>,

    /// Path to the plex DB. Defaults to the system-wide Plex Media Server library.
    #[clap(long, value_parser = parse_path)]
    pub plex_db: Option<PathBuf>,

    /// The email address of the plex user to add ratings for.
    #[clap(long)]
    pub plex_account: Option<String>,

    /// Copy banshee ratings into plex.
    #[clap(long)]
    pub update_ratings: bool,

    /// Log the writes that would happen without performing them.
    #[clap(long)]
    pub dry_run: bool,

    /// Optional TOML config file. Explicit flags take precedence over it.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Exit with status 1 even when the run succeeds, like older releases.
    #[clap(long)]
    pub legacy_exit_status: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            banshee_db: self.banshee_db.clone(),
            plex_db: self.plex_db.clone(),
            plex_account: self.plex_account.clone(),
            update_ratings: self.update_ratings,
            dry_run: self.dry_run,
            legacy_exit_status: self.legacy_exit_status,
        }
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")
}

fn main() -> Result<ExitCode> {
    let cli_args = CliArgs::parse();
    init_logging()?;

    info!(
        "banshee2plex {}-{}",
        env!("APP_VERSION"),
        env!("GIT_HASH")
    );

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    run_app(&config)?;

    if config.legacy_exit_status {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
