use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use locks_cli::commands::{events, report, sessions, util};
use locks_cli::{Cli, Commands, Config, Overrides};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout carries only the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref(), &Overrides::from(&cli.format))
        .context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let input = util::open_input(cli.input.as_deref())?;
    let stdout = std::io::stdout();
    let mut writer = stdout.lock();

    match &cli.command {
        Some(Commands::Report { json }) => report::run(input, &mut writer, &config, *json)?,
        Some(Commands::Events) => events::run(input, &mut writer)?,
        Some(Commands::Sessions) => sessions::run(input, &mut writer, &config)?,
        None => report::run(input, &mut writer, &config, false)?,
    }

    writer.flush()?;
    Ok(())
}
