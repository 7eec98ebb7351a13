//! The `ranking` subcommand: reps ordered by achievement, sales or positivation.

use anyhow::Result;
use clap::Args;
use salesportal_lib::aggregate::{rank_reps, rep_performance};
use salesportal_lib::{validation, RankBy};

use super::{load_store, Context, PeriodArgs};
use crate::output::{build_ranking_rows, emit};

#[derive(Args)]
pub struct RankingArgs {
    #[command(flatten)]
    pub period: PeriodArgs,

    /// Sort by: achievement, sales, positivation
    #[arg(long, default_value = "achievement")]
    pub sort_by: String,

    /// Show only the first N reps
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run(args: &RankingArgs, ctx: &Context) -> Result<()> {
    let period = args.period.period(ctx)?;
    let sort_by: RankBy = args.sort_by.parse()?;
    let rep = args.period.rep()?;

    // Ranks are computed over every rep; --rep only narrows what is shown
    let store = load_store(ctx, period.year()..=period.year(), None)?;
    let mut rows = rank_reps(rep_performance(&store, &period)?, sort_by);

    if let Some(ref rep) = rep {
        super::check_rep(&store, rep)?;
        rows.retain(|r| &r.rep_id == rep);
    }
    if let Some(top) = args.top {
        rows.truncate(validation::validate_top(top)?);
    }

    if rows.is_empty() {
        eprintln!("No reps found for {}.", period.label());
        return Ok(());
    }

    emit(ctx.format, build_ranking_rows(&rows)?, &rows)
}
