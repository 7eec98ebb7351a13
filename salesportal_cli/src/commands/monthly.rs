//! The `monthly` subcommand: one row per selected month.

use anyhow::Result;
use clap::Args;
use salesportal_lib::aggregate::monthly_breakdown;

use super::{load_store, Context, PeriodArgs};
use crate::output::{build_monthly_rows, emit};

#[derive(Args)]
pub struct MonthlyArgs {
    #[command(flatten)]
    pub period: PeriodArgs,
}

pub fn run(args: &MonthlyArgs, ctx: &Context) -> Result<()> {
    let period = args.period.period(ctx)?;
    let rep = args.period.rep()?;
    let store = load_store(ctx, period.year() - 1..=period.year(), rep.as_deref())?;

    let months = monthly_breakdown(&store, &period)?;
    if months.is_empty() {
        eprintln!("No months selected.");
        return Ok(());
    }

    emit(ctx.format, build_monthly_rows(&months)?, &months)
}
