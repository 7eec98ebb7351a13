//! CLI subcommand implementations.

pub mod breakdown;
pub mod budget;
pub mod coverage;
pub mod monthly;
pub mod ranking;
pub mod summary;

use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use clap::Args;
use salesportal_lib::adapter::Adapter;
use salesportal_lib::types::Snapshot;
use salesportal_lib::{validation, Period, PeriodSelection, RecordStore, StoreFilter};

use crate::output::OutputFormat;

/// Settings resolved from flags, environment and config before a command runs.
pub struct Context {
    pub snapshot: PathBuf,
    pub default_year: Option<i32>,
    pub format: OutputFormat,
}

/// Period and rep selectors shared by most subcommands.
#[derive(Args, Clone, Debug)]
pub struct PeriodArgs {
    /// Year (default: `default_year` from the config, else the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Months: 1,2,3 / 1-3 / jan-mar / all
    #[arg(long, default_value = "all")]
    pub months: String,

    /// Restrict to one rep id (e.g., u1)
    #[arg(long)]
    pub rep: Option<String>,
}

impl PeriodArgs {
    pub fn period(&self, ctx: &Context) -> Result<Period> {
        let selection = PeriodSelection {
            year: Some(resolve_year(self.year, ctx)?),
            months: validation::validate_months(&self.months)?,
        };
        Ok(Period::try_from(selection)?)
    }

    pub fn rep(&self) -> Result<Option<String>> {
        match self.rep {
            Some(ref val) => Ok(Some(validation::validate_rep_id(val)?)),
            None => Ok(None),
        }
    }
}

pub fn resolve_year(explicit: Option<i32>, ctx: &Context) -> Result<i32> {
    let year = explicit
        .or(ctx.default_year)
        .unwrap_or_else(|| Utc::now().year());
    Ok(validation::validate_year(year)?)
}

/// Load the snapshot into a store. `years` bounds the dated collections;
/// `rep` keeps only that rep's rows.
pub fn load_store(
    ctx: &Context,
    years: std::ops::RangeInclusive<i32>,
    rep: Option<&str>,
) -> Result<RecordStore> {
    tracing::debug!(snapshot = %ctx.snapshot.display(), "loading snapshot");
    let snapshot = Snapshot::from_path(&ctx.snapshot)?;
    let adapter = Adapter::with_seed_aliases()?;
    let mut filter = StoreFilter::new().with_years(years);
    if let Some(rep) = rep {
        filter = filter.with_rep(rep);
    }
    let store = RecordStore::from_snapshot(snapshot, &filter, &adapter)?;
    if let Some(rep) = rep {
        check_rep(&store, rep)?;
    }
    Ok(store)
}

/// Fail on a rep id that is neither on the roster nor in the data, suggesting
/// the closest roster entry.
pub fn check_rep(store: &RecordStore, rep: &str) -> Result<()> {
    if store.rep_ids().iter().any(|id| id == rep) {
        return Ok(());
    }
    match store.suggest_rep(rep) {
        Some(candidate) => bail!(
            "unknown rep '{}'. Did you mean '{}' ({})?",
            rep,
            candidate.id,
            candidate.display_name
        ),
        None => bail!("unknown rep '{}'", rep),
    }
}
