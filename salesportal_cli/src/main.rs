mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use salesportal_lib::config::DEFAULT_CONFIG_FILE;
use salesportal_lib::PortalConfig;

use crate::commands::Context;
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "salesportal")]
#[command(about = "Sales, target and budget figures from a sales portal snapshot")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, global = true)]
    output: Option<String>,

    /// Config file (default: salesportal.toml in the working directory, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot JSON to read (overrides the config file and SALESPORTAL_SNAPSHOT)
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, achievement and growth for a period
    Summary(commands::summary::SummaryArgs),
    /// Reps ranked by achievement, sales or positivation
    Ranking(commands::ranking::RankingArgs),
    /// Sales grouped by channel, client, rep or month
    Breakdown(commands::breakdown::BreakdownArgs),
    /// Investment budget cap and usage per rep
    Budget(commands::budget::BudgetArgs),
    /// Month-by-month totals with prior-year growth
    Monthly(commands::monthly::MonthlyArgs),
    /// Share of each rep's clients with a sale in the period
    Coverage(commands::coverage::CoverageArgs),
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("salesportal=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) if !path.exists() => bail!("config file not found: {}", path.display()),
        Some(path) => PortalConfig::load(path)?,
        None => PortalConfig::load(&PathBuf::from(DEFAULT_CONFIG_FILE))?,
    }
    .with_env();

    let snapshot = match cli.snapshot.or(config.snapshot) {
        Some(path) => path,
        None => bail!(
            "no snapshot given. Pass --snapshot, set SALESPORTAL_SNAPSHOT or add `snapshot` to {}",
            DEFAULT_CONFIG_FILE
        ),
    };

    let format: OutputFormat = cli
        .output
        .or(config.output)
        .as_deref()
        .unwrap_or("table")
        .parse()?;

    let ctx = Context {
        snapshot,
        default_year: config.default_year,
        format,
    };

    match &cli.command {
        Commands::Summary(args) => commands::summary::run(args, &ctx)?,
        Commands::Ranking(args) => commands::ranking::run(args, &ctx)?,
        Commands::Breakdown(args) => commands::breakdown::run(args, &ctx)?,
        Commands::Budget(args) => commands::budget::run(args, &ctx)?,
        Commands::Monthly(args) => commands::monthly::run(args, &ctx)?,
        Commands::Coverage(args) => commands::coverage::run(args, &ctx)?,
    }

    Ok(())
}
