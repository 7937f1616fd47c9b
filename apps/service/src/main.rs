use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use liveness::{Aggregator, CheckStatusBody, ProjectRegistry};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, level_filters::LevelFilter};

mod config;
mod report;
mod validation;

use config::Config;

/// Check whether the dashboard projects are reachable right now
#[derive(Debug, Parser)]
#[command(name = "mission-control", version, about)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/mission-control/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log probe details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run one monitoring pass (default)
    Check {
        /// Print the status map as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run passes repeatedly until interrupted
    Watch {
        /// Seconds between passes, overriding the config
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Probe a single URL and print the check-status body
    Probe { url: String },
    /// Print the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_with_level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN });

    let config = Config::from_config(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Check { json: false }) {
        Command::Check { json } => check(&config, json).await,
        Command::Watch { interval } => watch(&config, interval).await,
        Command::Probe { url } => probe(&config, &url).await,
        Command::Config => {
            print!("{config}");
            Ok(())
        }
    }
}

fn aggregator(config: &Config) -> Result<(Aggregator, ProjectRegistry)> {
    let probe = config.build_probe().context("Failed to build probe")?;
    let registry = config.registry()?;
    Ok((Aggregator::new(probe), registry))
}

async fn check(config: &Config, json: bool) -> Result<()> {
    let (aggregator, registry) = aggregator(config)?;
    let report = aggregator.run_pass(registry.projects()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report::PassSummary::from(report.as_ref()))?);
    } else {
        print!("{}", report::render(&report, registry.projects()));
    }
    Ok(())
}

async fn watch(config: &Config, interval_override: Option<u64>) -> Result<()> {
    let seconds = interval_override.unwrap_or(config.watch.interval_seconds);
    validation::validate_check_interval(seconds)?;

    let (aggregator, registry) = aggregator(config)?;
    let mut timer = interval(Duration::from_secs(seconds));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(interval_seconds = seconds, "Watching {} projects", registry.monitorable_count());

    loop {
        tokio::select! {
            _ = timer.tick() => {
                let report = aggregator.run_pass(registry.projects()).await?;
                println!("[{}]", report.completed_at.format("%Y-%m-%d %H:%M:%S UTC"));
                print!("{}", report::render(&report, registry.projects()));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                return Ok(());
            }
        }
    }
}

async fn probe(config: &Config, url: &str) -> Result<()> {
    let probe = config.build_probe().context("Failed to build probe")?;
    let outcome = probe.probe(url).await;

    println!("{}", serde_json::to_string_pretty(&CheckStatusBody::from(&outcome))?);
    Ok(())
}
