//! The `summary` subcommand: period totals and growth over the prior year.

use anyhow::Result;
use clap::Args;
use salesportal_lib::aggregate::period_summary;
use salesportal_lib::Baseline;

use super::{load_store, Context, PeriodArgs};
use crate::output::{build_summary_rows, emit};

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Growth baseline: actual (prior-year sales) or target (prior-year targets)
    #[arg(long, default_value = "actual")]
    pub baseline: String,
}

pub fn run(args: &SummaryArgs, ctx: &Context) -> Result<()> {
    let period = args.period.period(ctx)?;
    let baseline: Baseline = args.baseline.parse()?;
    let rep = args.period.rep()?;
    let store = load_store(ctx, period.year() - 1..=period.year(), rep.as_deref())?;

    let summary = period_summary(&store, &period, baseline)?;
    if summary.aggregate.total_sales == 0.0 && summary.aggregate.total_target == 0.0 {
        eprintln!("No sales or targets found for {}.", summary.period);
    }

    let summaries = [summary];
    emit(ctx.format, build_summary_rows(&summaries)?, &summaries[0])
}
