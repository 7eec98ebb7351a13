//! The `budget` subcommand: yearly investment cap against approved spend.

use anyhow::Result;
use clap::Args;
use salesportal_lib::aggregate::{rep_budget, rep_budgets};
use salesportal_lib::validation;

use super::{load_store, resolve_year, Context};
use crate::output::{build_budget_rows, emit};

#[derive(Args)]
pub struct BudgetArgs {
    /// Year (default: `default_year` from the config, else the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Restrict to one rep id (e.g., u1)
    #[arg(long)]
    pub rep: Option<String>,
}

pub fn run(args: &BudgetArgs, ctx: &Context) -> Result<()> {
    let year = resolve_year(args.year, ctx)?;
    let rep = match args.rep {
        Some(ref val) => Some(validation::validate_rep_id(val)?),
        None => None,
    };
    let store = load_store(ctx, year..=year, rep.as_deref())?;

    let budgets = match rep {
        Some(ref rep) => vec![rep_budget(&store, rep, year)?],
        None => rep_budgets(&store, year)?,
    };

    let overspent = budgets
        .iter()
        .filter(|b| b.utilization.is_overspent())
        .count();
    if overspent > 0 {
        eprintln!("{} rep(s) over budget in {}", overspent, year);
    }

    emit(ctx.format, build_budget_rows(&budgets)?, &budgets)
}
