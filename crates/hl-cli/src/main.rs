use anyhow::{Context, Result};
use chrono::{Local, TimeZone, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hl_cli::commands::{day, ghosts, summary, week};
use hl_cli::{Cli, Commands, Config, ViewContext};

/// Resolves the view for `command` and runs it against stdout.
fn dispatch<Tz: TimeZone>(command: &Commands, config: &Config, tz: Tz, zone_name: String) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match command {
        Commands::Day(args) => {
            let view = ViewContext::resolve(args, config, tz, zone_name)?;
            day::run(&mut stdout, &view, args.json)
        }
        Commands::Week(args) => {
            let view = ViewContext::resolve(args, config, tz, zone_name)?;
            week::run(&mut stdout, &view, args.json)
        }
        Commands::Ghosts {
            view: args,
            mode,
            interval,
        } => {
            let view = ViewContext::resolve(args, config, tz, zone_name)?;
            let overrides = ghosts::Overrides {
                mode: mode.map(Into::into),
                interval_hours: *interval,
            };
            ghosts::run(&mut stdout, &view, overrides, args.json)
        }
        Commands::Summary(args) => {
            let view = ViewContext::resolve(args, config, tz, zone_name)?;
            summary::run(&mut stdout, &view, args.json)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if cli.utc {
        dispatch(command, &config, Utc, "UTC".to_string())
    } else {
        let zone_name = iana_time_zone::get_timezone().unwrap_or_else(|_| "local".to_string());
        dispatch(command, &config, Local, zone_name)
    }
}
