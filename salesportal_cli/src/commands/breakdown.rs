//! The `breakdown` subcommand: nested sales groups with share of parent.

use anyhow::{bail, Result};
use clap::Args;
use salesportal_lib::breakdown::{flatten, Dimension, SaleDimension};
use salesportal_lib::{breakdown, filter_by_period, SaleRecord};

use super::{load_store, Context, PeriodArgs};
use crate::output::{build_breakdown_rows, emit};

#[derive(Args)]
pub struct BreakdownArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Grouping levels, outermost first: channel, client, rep, month (e.g., channel,client)
    #[arg(long, default_value = "channel")]
    pub by: String,
}

pub fn run(args: &BreakdownArgs, ctx: &Context) -> Result<()> {
    let period = args.period.period(ctx)?;
    let dimensions = args
        .by
        .split(',')
        .map(|name| name.parse::<SaleDimension>())
        .collect::<Result<Vec<_>, _>>()?;
    if dimensions.is_empty() || dimensions.len() > 4 {
        bail!("--by takes between 1 and 4 dimensions");
    }

    let rep = args.period.rep()?;
    let store = load_store(ctx, period.year()..=period.year(), rep.as_deref())?;
    let sales = filter_by_period(store.sales(), &period);
    if sales.is_empty() {
        eprintln!("No sales found for {}.", period.label());
        return Ok(());
    }

    let resolved: Vec<Box<dyn Dimension<SaleRecord> + '_>> =
        dimensions.iter().map(|d| d.resolve(&store)).collect();
    let levels: Vec<&dyn Dimension<SaleRecord>> = resolved
        .iter()
        .map(|d| &**d as &dyn Dimension<SaleRecord>)
        .collect();
    let groups = breakdown(&sales, |s: &SaleRecord| s.amount, &levels)?;

    emit(ctx.format, build_breakdown_rows(&flatten(&groups))?, &groups)
}
