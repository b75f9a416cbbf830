use chrono::Local;
use clap::{Parser, Subcommand};
use cross_venue_arbitrage::{
    config::MonitorConfig,
    ledger::{resolve_current_bucket_keys, TradeLedger},
    strategy::ArbitrageMonitor,
    utils::{logger, metrics},
    ArbitrageError, Result,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "arbitrage-monitor")]
#[command(about = "Cross-venue arbitrage monitor")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/monitor.toml")]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Log file path
    #[arg(long, default_value = "logs/arbitrage-monitor.log")]
    log_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the monitor loop
    Run {
        /// Stop after this many cycles (runs forever when omitted)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Print the current daily/weekly/monthly totals
    Summary,
    /// Truncate the current ledger buckets and the process log
    Reset {
        /// Confirm the destructive reset
        #[arg(long)]
        force: bool,
    },
    /// Validate configuration
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    logger::init(&cli.log_level, &cli.log_file)?;

    info!(
        "Starting Cross-Venue Arbitrage Monitor v{}",
        cross_venue_arbitrage::VERSION
    );

    let config = MonitorConfig::from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Run { cycles } => run_monitor(config, cycles).await,
        Commands::Summary => show_summary(config),
        Commands::Reset { force } => reset_ledgers(config, force, &cli.log_file),
        Commands::Validate => validate_config(config),
    }
}

async fn run_monitor(config: MonitorConfig, cycles: Option<u64>) -> Result<()> {
    config.validate()?;

    if config.monitoring.enable_metrics {
        metrics::install_exporter(&config.monitoring.metrics_listen_addr)?;
    }

    let mut monitor = ArbitrageMonitor::from_config(&config)?;
    monitor.run(cycles).await
}

fn show_summary(config: MonitorConfig) -> Result<()> {
    let ledger = TradeLedger::new(&config.ledger.directory, config.stake())?;

    println!("Trade summaries:");
    for (key, totals) in ledger.aggregate_current(Local::now())? {
        println!("  {:<8} {}", key.period(), totals);
    }

    Ok(())
}

fn reset_ledgers(config: MonitorConfig, force: bool, log_file: &Path) -> Result<()> {
    if !force {
        return Err(ArbitrageError::Config(
            "Refusing to reset ledgers without --force".to_string(),
        )
        .into());
    }

    let mut ledger = TradeLedger::new(&config.ledger.directory, config.stake())?;
    for key in resolve_current_bucket_keys(Local::now()) {
        ledger.reset(&key)?;
    }

    truncate_process_logs(log_file)?;
    info!("Current ledger buckets and process log cleared");
    println!("Ledger reset complete.");

    Ok(())
}

/// Truncate every rolled segment of the process log (the appender suffixes
/// the base name with a date)
fn truncate_process_logs(log_file: &Path) -> Result<()> {
    let dir = log_file.parent().unwrap_or(Path::new("."));
    if !dir.exists() {
        return Ok(());
    }

    let Some(prefix) = log_file.file_name().and_then(|n| n.to_str()) else {
        return Ok(());
    };

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(prefix) {
            std::fs::File::create(entry.path())?;
        }
    }

    Ok(())
}

fn validate_config(config: MonitorConfig) -> Result<()> {
    info!("Validating configuration...");

    match config.validate() {
        Ok(_) => {
            info!("Configuration is valid");
            println!("Configuration validation passed!");
        }
        Err(e) => {
            error!("Configuration validation failed: {}", e);
            return Err(e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert()
    }
}
