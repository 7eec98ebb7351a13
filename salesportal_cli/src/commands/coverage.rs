//! The `coverage` subcommand: how much of each rep's client portfolio bought
//! in the period.

use anyhow::Result;
use clap::Args;
use salesportal_lib::aggregate::{portfolio_coverage, PortfolioCoverage};

use super::{load_store, Context, PeriodArgs};
use crate::output::{build_coverage_rows, emit};

#[derive(Args)]
pub struct CoverageArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Hide reps that own no clients
    #[arg(long)]
    pub owners_only: bool,
}

pub fn run(args: &CoverageArgs, ctx: &Context) -> Result<()> {
    let period = args.period.period(ctx)?;
    let rep = args.period.rep()?;
    let store = load_store(ctx, period.year()..=period.year(), rep.as_deref())?;

    let rep_ids = match rep {
        Some(rep) => vec![rep],
        None => store.rep_ids(),
    };
    let mut coverage = rep_ids
        .iter()
        .map(|id| portfolio_coverage(&store, id, &period))
        .collect::<Result<Vec<PortfolioCoverage>, _>>()?;
    if args.owners_only {
        coverage.retain(|c| c.owned_clients > 0);
    }

    emit(ctx.format, build_coverage_rows(&coverage)?, &coverage)
}
