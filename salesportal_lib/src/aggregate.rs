//! Period aggregation: totals, achievement, growth and budget metrics.
//!
//! This module provides pure computation functions over records already
//! narrowed to a period:
//! - Sales vs target totals with achievement percentage and positivation
//! - Growth against an explicitly named baseline
//! - Per-rep performance rows for rankings
//! - Budget ("verba") utilization at 5% of the annual target
//! - Per-month rows and portfolio coverage

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;
use crate::period::{filter_by_period, Period};
use crate::records::{RepId, SaleRecord, TargetRecord, TaxId};
use crate::store::RecordStore;

/// Share of a rep's annual target available as investment budget.
pub const BUDGET_SHARE_OF_TARGET: f64 = 0.05;

/// Sum amounts, rejecting any non-finite or negative value.
pub fn sum_amounts<I>(amounts: I, context: &str) -> Result<f64, EngineError>
where
    I: IntoIterator<Item = f64>,
{
    let mut total = 0.0;
    for amount in amounts {
        if !amount.is_finite() || amount < 0.0 {
            return Err(EngineError::invalid_amount(context, amount));
        }
        total += amount;
    }
    Ok(total)
}

/// `actual / target * 100`, or 0 when there is no target.
pub fn achievement_pct(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        actual / target * 100.0
    } else {
        0.0
    }
}

/// `part / whole * 100`, or 0 when the whole is 0.
pub fn share_pct(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Totals for one slice of sales and targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aggregate {
    pub total_sales: f64,
    pub total_target: f64,
    /// Signed `total_sales - total_target`; a difference, not an amount.
    pub difference: f64,
    pub achievement_pct: f64,
    /// Distinct clients (by normalized tax id) with at least one sale.
    pub positivated_count: usize,
}

/// Aggregate sales against targets. Callers narrow both to a period first.
pub fn aggregate(sales: &[SaleRecord], targets: &[TargetRecord]) -> Result<Aggregate, EngineError> {
    aggregate_iter(sales.iter(), targets.iter())
}

fn aggregate_iter<'a, S, T>(sales: S, targets: T) -> Result<Aggregate, EngineError>
where
    S: Iterator<Item = &'a SaleRecord> + Clone,
    T: Iterator<Item = &'a TargetRecord>,
{
    let total_sales = sum_amounts(sales.clone().map(|s| s.amount), "sales total")?;
    let total_target = sum_amounts(targets.map(|t| t.amount), "target total")?;
    let positivated: HashSet<&TaxId> = sales.map(|s| &s.client_tax_id).collect();

    Ok(Aggregate {
        total_sales,
        total_target,
        difference: total_sales - total_target,
        achievement_pct: achievement_pct(total_sales, total_target),
        positivated_count: positivated.len(),
    })
}

/// Growth of a figure over its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Growth {
    /// `(current / prior - 1) * 100`, or 0 when there is no baseline.
    pub pct: f64,
    /// False when the prior figure is 0. A 0 `pct` then means "unknown",
    /// not "flat".
    pub has_baseline: bool,
}

/// What a caller should display for a [`Growth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrowthStatus {
    NoBaseline,
    Measured(f64),
}

impl Growth {
    pub fn status(&self) -> GrowthStatus {
        if self.has_baseline {
            GrowthStatus::Measured(self.pct)
        } else {
            GrowthStatus::NoBaseline
        }
    }
}

pub fn growth(current: f64, prior: f64) -> Growth {
    if prior > 0.0 {
        Growth {
            pct: (current / prior - 1.0) * 100.0,
            has_baseline: true,
        }
    } else {
        Growth {
            pct: 0.0,
            has_baseline: false,
        }
    }
}

/// The figure a growth percentage is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Baseline {
    /// Actual sales in the same months of the previous year.
    PriorYearActual,
    /// Targets for the same months of the previous year.
    PriorYearTarget,
}

impl fmt::Display for Baseline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Baseline::PriorYearActual => write!(f, "prior-year actual"),
            Baseline::PriorYearTarget => write!(f, "prior-year target"),
        }
    }
}

impl FromStr for Baseline {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actual" | "prior-year-actual" | "sales" => Ok(Baseline::PriorYearActual),
            "target" | "prior-year-target" => Ok(Baseline::PriorYearTarget),
            _ => Err(EngineError::InvalidInput(format!(
                "unknown baseline '{}'. Valid values: actual, target",
                s
            ))),
        }
    }
}

/// A current figure against a labeled baseline figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline: Baseline,
    pub current: f64,
    pub prior: f64,
    pub growth: Growth,
}

impl Comparison {
    pub fn new(baseline: Baseline, current: f64, prior: f64) -> Self {
        Self {
            baseline,
            current,
            prior,
            growth: growth(current, prior),
        }
    }
}

/// Baseline figure for `period` moved back one year.
fn prior_year_figure(
    store: &RecordStore,
    period: &Period,
    baseline: Baseline,
) -> Result<f64, EngineError> {
    let prior = period.prior_year();
    match baseline {
        Baseline::PriorYearActual => sum_amounts(
            filter_by_period(store.sales(), &prior)
                .iter()
                .map(|s| s.amount),
            "prior-year sales",
        ),
        Baseline::PriorYearTarget => sum_amounts(
            filter_by_period(store.targets(), &prior)
                .iter()
                .map(|t| t.amount),
            "prior-year targets",
        ),
    }
}

/// Period totals plus growth over the same months of the previous year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub period: String,
    pub aggregate: Aggregate,
    pub vs_prior_year: Comparison,
}

pub fn period_summary(
    store: &RecordStore,
    period: &Period,
    baseline: Baseline,
) -> Result<PeriodSummary, EngineError> {
    let sales = filter_by_period(store.sales(), period);
    let targets = filter_by_period(store.targets(), period);
    let aggregate = aggregate(&sales, &targets)?;
    let prior = prior_year_figure(store, period, baseline)?;
    Ok(PeriodSummary {
        period: period.label(),
        aggregate,
        vs_prior_year: Comparison::new(baseline, aggregate.total_sales, prior),
    })
}

/// Full-year sales of `year` against the previous year's actual sales or
/// targets, as named by `baseline`.
pub fn annual_comparison(
    store: &RecordStore,
    year: i32,
    baseline: Baseline,
) -> Result<Comparison, EngineError> {
    let period = Period::full_year(year);
    let current = sum_amounts(
        filter_by_period(store.sales(), &period)
            .iter()
            .map(|s| s.amount),
        "annual sales",
    )?;
    let prior = prior_year_figure(store, &period, baseline)?;
    Ok(Comparison::new(baseline, current, prior))
}

/// One rep's totals over every month of a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepPerformance {
    pub rank: usize,
    pub rep_id: RepId,
    pub rep_name: String,
    pub total_sales: f64,
    pub total_target: f64,
    pub difference: f64,
    pub achievement_pct: f64,
    pub positivated_count: usize,
}

/// Ordering for rep rankings, always descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankBy {
    #[default]
    Achievement,
    Sales,
    Positivation,
}

impl FromStr for RankBy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "achievement" | "pct" => Ok(RankBy::Achievement),
            "sales" | "total" => Ok(RankBy::Sales),
            "positivation" | "clients" => Ok(RankBy::Positivation),
            _ => Err(EngineError::InvalidInput(format!(
                "unknown ranking '{}'. Valid values: achievement, sales, positivation",
                s
            ))),
        }
    }
}

/// One row per rep with totals summed across every month of `period`.
///
/// Includes every roster rep (zero rows for reps without activity) and any
/// rep that only appears in the data. Rows come back ranked by achievement.
pub fn rep_performance(
    store: &RecordStore,
    period: &Period,
) -> Result<Vec<RepPerformance>, EngineError> {
    let sales = filter_by_period(store.sales(), period);
    let targets = filter_by_period(store.targets(), period);

    let mut sales_by_rep: HashMap<&str, Vec<&SaleRecord>> = HashMap::new();
    for sale in &sales {
        sales_by_rep.entry(sale.rep_id.as_str()).or_default().push(sale);
    }
    let mut targets_by_rep: HashMap<&str, Vec<&TargetRecord>> = HashMap::new();
    for target in &targets {
        targets_by_rep
            .entry(target.rep_id.as_str())
            .or_default()
            .push(target);
    }

    let no_sales = Vec::new();
    let no_targets = Vec::new();
    let mut rows = Vec::new();
    for rep_id in store.rep_ids() {
        let rep_sales = sales_by_rep.get(rep_id.as_str()).unwrap_or(&no_sales);
        let rep_targets = targets_by_rep.get(rep_id.as_str()).unwrap_or(&no_targets);
        let totals = aggregate_iter(rep_sales.iter().copied(), rep_targets.iter().copied())?;
        rows.push(RepPerformance {
            rank: 0,
            rep_name: store.rep_name(&rep_id).to_string(),
            rep_id,
            total_sales: totals.total_sales,
            total_target: totals.total_target,
            difference: totals.difference,
            achievement_pct: totals.achievement_pct,
            positivated_count: totals.positivated_count,
        });
    }

    tracing::debug!(period = %period.label(), reps = rows.len(), "rep performance computed");
    Ok(rank_reps(rows, RankBy::Achievement))
}

/// Sort rows descending by `by` and renumber ranks from 1.
///
/// The sort is stable: reps with equal values keep their incoming order.
pub fn rank_reps(mut rows: Vec<RepPerformance>, by: RankBy) -> Vec<RepPerformance> {
    let key = |row: &RepPerformance| -> f64 {
        match by {
            RankBy::Achievement => row.achievement_pct,
            RankBy::Sales => row.total_sales,
            RankBy::Positivation => row.positivated_count as f64,
        }
    };
    rows.sort_by(|a, b| {
        key(b)
            .partial_cmp(&key(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (index, row) in rows.iter_mut().enumerate() {
        row.rank = index + 1;
    }
    rows
}

/// Budget cap, consumption and what is left of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetUtilization {
    pub cap: f64,
    pub used: f64,
    /// `cap - used`; negative when overspent.
    pub remaining: f64,
    pub used_pct: f64,
}

impl BudgetUtilization {
    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

pub fn budget_utilization(
    annual_target_total: f64,
    approved_investment_total: f64,
) -> Result<BudgetUtilization, EngineError> {
    let annual = sum_amounts([annual_target_total], "annual target")?;
    let used = sum_amounts([approved_investment_total], "approved investments")?;
    let cap = annual * BUDGET_SHARE_OF_TARGET;
    Ok(BudgetUtilization {
        cap,
        used,
        remaining: cap - used,
        used_pct: share_pct(used, cap),
    })
}

/// Budget position of one rep for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepBudget {
    pub rep_id: RepId,
    pub rep_name: String,
    pub year: i32,
    pub annual_target: f64,
    pub utilization: BudgetUtilization,
}

/// Budget of `rep_id` for `year`: 5% of the rep's targets over the whole
/// year, consumed by the rep's approved investments dated in that year.
pub fn rep_budget(store: &RecordStore, rep_id: &str, year: i32) -> Result<RepBudget, EngineError> {
    let period = Period::full_year(year);
    let annual_target = sum_amounts(
        filter_by_period(store.targets(), &period)
            .iter()
            .filter(|t| t.rep_id == rep_id)
            .map(|t| t.amount),
        "annual target",
    )?;
    let approved = sum_amounts(
        filter_by_period(store.investments(), &period)
            .iter()
            .filter(|i| i.rep_id == rep_id && i.is_approved())
            .map(|i| i.amount),
        "approved investments",
    )?;
    let utilization = budget_utilization(annual_target, approved)?;
    if utilization.is_overspent() {
        tracing::warn!(rep_id, year, remaining = utilization.remaining, "budget overspent");
    }
    Ok(RepBudget {
        rep_id: rep_id.to_string(),
        rep_name: store.rep_name(rep_id).to_string(),
        year,
        annual_target,
        utilization,
    })
}

/// [`rep_budget`] for every rep in the store.
pub fn rep_budgets(store: &RecordStore, year: i32) -> Result<Vec<RepBudget>, EngineError> {
    store
        .rep_ids()
        .iter()
        .map(|rep_id| rep_budget(store, rep_id, year))
        .collect()
}

/// One calendar month of a period, compared with the same month a year
/// earlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub year: i32,
    pub month: u32,
    pub total_sales: f64,
    pub total_target: f64,
    pub achievement_pct: f64,
    pub positivated_count: usize,
    pub vs_prior_year: Comparison,
}

/// One row per selected month, in calendar order. Growth is always against
/// the prior year's actual sales for that month.
pub fn monthly_breakdown(
    store: &RecordStore,
    period: &Period,
) -> Result<Vec<MonthRow>, EngineError> {
    period
        .months()
        .iter()
        .map(|&month| {
            let single = Period::new(period.year(), [month])?;
            let summary = period_summary(store, &single, Baseline::PriorYearActual)?;
            Ok(MonthRow {
                year: period.year(),
                month,
                total_sales: summary.aggregate.total_sales,
                total_target: summary.aggregate.total_target,
                achievement_pct: summary.aggregate.achievement_pct,
                positivated_count: summary.aggregate.positivated_count,
                vs_prior_year: summary.vs_prior_year,
            })
        })
        .collect()
}

/// How much of a rep's client portfolio bought in a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioCoverage {
    pub rep_id: RepId,
    pub rep_name: String,
    pub owned_clients: usize,
    pub positivated_clients: usize,
    pub coverage_pct: f64,
}

/// Owned clients of `rep_id` with at least one sale by that rep in `period`,
/// matched on normalized tax id.
pub fn portfolio_coverage(
    store: &RecordStore,
    rep_id: &str,
    period: &Period,
) -> Result<PortfolioCoverage, EngineError> {
    let sold_to: HashSet<TaxId> = filter_by_period(store.sales(), period)
        .into_iter()
        .filter(|s| s.rep_id == rep_id)
        .map(|s| s.client_tax_id)
        .collect();
    let owned = store.clients_owned_by(rep_id);
    let positivated = owned
        .iter()
        .filter(|c| sold_to.contains(&c.tax_id))
        .count();
    Ok(PortfolioCoverage {
        rep_id: rep_id.to_string(),
        rep_name: store.rep_name(rep_id).to_string(),
        owned_clients: owned.len(),
        positivated_clients: positivated,
        coverage_pct: share_pct(positivated as f64, owned.len() as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InvestmentRecord, InvestmentStatus, RecordSet, Rep};
    use chrono::NaiveDate;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn sale(rep: &str, tax: &str, amount: f64, y: i32, m: u32) -> SaleRecord {
        SaleRecord {
            rep_id: rep.to_string(),
            client_tax_id: TaxId::normalize(tax),
            client_name: None,
            channel: None,
            amount,
            date: NaiveDate::from_ymd_opt(y, m, 10).unwrap(),
        }
    }

    fn target(rep: &str, amount: f64, y: i32, m: u32) -> TargetRecord {
        TargetRecord {
            rep_id: rep.to_string(),
            year: y,
            month: m,
            amount,
        }
    }

    fn rep(id: &str, name: &str) -> Rep {
        Rep {
            id: id.to_string(),
            display_name: name.to_string(),
        }
    }

    #[test]
    fn test_two_month_scenario() {
        let sales = vec![sale("A", "1", 300.0, 2024, 1), sale("A", "1", 200.0, 2024, 2)];
        let targets = vec![target("A", 400.0, 2024, 1), target("A", 400.0, 2024, 2)];
        let period = Period::new(2024, [1, 2]).unwrap();
        let result = aggregate(
            &filter_by_period(&sales, &period),
            &filter_by_period(&targets, &period),
        )
        .unwrap();
        assert_eq!(result.total_sales, 500.0);
        assert_eq!(result.total_target, 800.0);
        assert_eq!(result.achievement_pct, 62.5);
        assert_eq!(result.difference, -300.0);
        assert_eq!(result.positivated_count, 1);
    }

    #[test]
    fn test_zero_target_achievement_is_zero() {
        for total in [0.0, 1.0, 1_000_000.0] {
            let sales = vec![sale("A", "1", total, 2024, 1)];
            let result = aggregate(&sales, &[]).unwrap();
            assert_eq!(result.achievement_pct, 0.0);
            assert!(!result.achievement_pct.is_nan());
        }
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        let result = aggregate(&[], &[]).unwrap();
        assert_eq!(result.total_sales, 0.0);
        assert_eq!(result.total_target, 0.0);
        assert_eq!(result.achievement_pct, 0.0);
        assert_eq!(result.positivated_count, 0);
    }

    #[test]
    fn test_positivation_uses_normalized_tax_ids() {
        let sales = vec![
            sale("A", "12.345.678/0001-90", 1.0, 2024, 1),
            sale("A", "12345678000190", 1.0, 2024, 1),
            sale("B", "98.765.432/0001-10", 1.0, 2024, 1),
        ];
        assert_eq!(aggregate(&sales, &[]).unwrap().positivated_count, 2);
    }

    #[test]
    fn test_negative_amount_fails_fast() {
        let sales = vec![sale("A", "1", -5.0, 2024, 1)];
        assert!(matches!(
            aggregate(&sales, &[]),
            Err(EngineError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_nan_amount_fails_fast() {
        assert!(sum_amounts([1.0, f64::NAN], "test").is_err());
        assert!(sum_amounts([f64::INFINITY], "test").is_err());
        assert_eq!(sum_amounts(Vec::new(), "test").unwrap(), 0.0);
    }

    #[test]
    fn test_growth_without_baseline() {
        let g = growth(100.0, 0.0);
        assert!(!g.has_baseline);
        assert_eq!(g.pct, 0.0);
        assert_eq!(g.status(), GrowthStatus::NoBaseline);
    }

    #[test]
    fn test_growth_with_baseline() {
        let g = growth(150.0, 100.0);
        assert!(g.has_baseline);
        assert_eq!(g.pct, 50.0);
        assert_eq!(g.status(), GrowthStatus::Measured(50.0));
        assert_eq!(growth(50.0, 100.0).pct, -50.0);
    }

    #[test]
    fn test_budget_overspend() {
        let b = budget_utilization(1_000_000.0, 60_000.0).unwrap();
        assert!(close(b.cap, 50_000.0));
        assert!(close(b.remaining, -10_000.0));
        assert!(close(b.used_pct, 120.0));
        assert!(b.is_overspent());
    }

    #[test]
    fn test_budget_without_target() {
        let b = budget_utilization(0.0, 100.0).unwrap();
        assert_eq!(b.cap, 0.0);
        assert_eq!(b.used_pct, 0.0);
        assert_eq!(b.remaining, -100.0);
    }

    #[test]
    fn test_budget_rejects_non_finite() {
        assert!(budget_utilization(f64::NAN, 0.0).is_err());
        assert!(budget_utilization(100.0, -1.0).is_err());
    }

    #[test]
    fn test_rank_reps_is_stable() {
        let row = |id: &str, pct: f64| RepPerformance {
            rank: 0,
            rep_id: id.to_string(),
            rep_name: id.to_string(),
            total_sales: 0.0,
            total_target: 0.0,
            difference: 0.0,
            achievement_pct: pct,
            positivated_count: 0,
        };
        let ranked = rank_reps(
            vec![row("a", 50.0), row("b", 80.0), row("c", 50.0), row("d", 80.0)],
            RankBy::Achievement,
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.rep_id.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[3].rank, 4);
    }

    fn store() -> RecordStore {
        RecordStore::new(RecordSet {
            sales: vec![
                sale("A", "1", 300.0, 2024, 1),
                sale("A", "2", 200.0, 2024, 2),
                sale("B", "3", 900.0, 2024, 1),
                sale("A", "1", 250.0, 2023, 1),
            ],
            targets: vec![
                target("A", 400.0, 2024, 1),
                target("A", 400.0, 2024, 2),
                target("B", 1000.0, 2024, 1),
                target("A", 500.0, 2023, 1),
            ],
            investments: vec![
                InvestmentRecord {
                    rep_id: "A".to_string(),
                    client_id: "c1".to_string(),
                    amount: 30.0,
                    date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    status: InvestmentStatus::Approved,
                },
                InvestmentRecord {
                    rep_id: "A".to_string(),
                    client_id: "c1".to_string(),
                    amount: 999.0,
                    date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                    status: InvestmentStatus::Pending,
                },
                InvestmentRecord {
                    rep_id: "A".to_string(),
                    client_id: "c1".to_string(),
                    amount: 999.0,
                    date: NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
                    status: InvestmentStatus::Approved,
                },
            ],
            reps: vec![rep("A", "Ana"), rep("B", "Bruno"), rep("C", "Carla")],
            clients: vec![],
        })
    }

    #[test]
    fn test_rep_performance_one_row_per_rep() {
        let store = store();
        let rows = rep_performance(&store, &Period::new(2024, [1, 2]).unwrap()).unwrap();
        assert_eq!(rows.len(), 3);
        // B: 900/1000 = 90%, A: 500/800 = 62.5%, C: no activity
        assert_eq!(rows[0].rep_id, "B");
        assert!(close(rows[0].achievement_pct, 90.0));
        assert_eq!(rows[1].rep_id, "A");
        assert_eq!(rows[1].total_sales, 500.0);
        assert_eq!(rows[1].total_target, 800.0);
        assert_eq!(rows[1].positivated_count, 2);
        assert_eq!(rows[1].rep_name, "Ana");
        assert_eq!(rows[2].rep_id, "C");
        assert_eq!(rows[2].total_sales, 0.0);
        assert_eq!(rows[2].rank, 3);
    }

    #[test]
    fn test_rep_performance_totals_match_aggregate() {
        let store = store();
        let period = Period::new(2024, [1, 2]).unwrap();
        let rows = rep_performance(&store, &period).unwrap();
        let whole = aggregate(
            &filter_by_period(store.sales(), &period),
            &filter_by_period(store.targets(), &period),
        )
        .unwrap();
        let summed: f64 = rows.iter().map(|r| r.total_sales).sum();
        assert_eq!(summed, whole.total_sales);
    }

    #[test]
    fn test_rep_budget_counts_only_approved_in_year() {
        let store = store();
        let budget = rep_budget(&store, "A", 2024).unwrap();
        assert_eq!(budget.annual_target, 800.0);
        assert!(close(budget.utilization.cap, 40.0));
        assert_eq!(budget.utilization.used, 30.0);
        assert!(close(budget.utilization.remaining, 10.0));
        assert!(close(budget.utilization.used_pct, 75.0));
    }

    #[test]
    fn test_rep_budgets_cover_roster() {
        let store = store();
        let budgets = rep_budgets(&store, 2024).unwrap();
        assert_eq!(budgets.len(), 3);
        assert_eq!(budgets[2].rep_id, "C");
        assert_eq!(budgets[2].utilization.cap, 0.0);
    }

    #[test]
    fn test_period_summary_against_prior_actual() {
        let store = store();
        let period = Period::new(2024, [1]).unwrap();
        let summary = period_summary(&store, &period, Baseline::PriorYearActual).unwrap();
        assert_eq!(summary.aggregate.total_sales, 1200.0);
        assert_eq!(summary.vs_prior_year.prior, 250.0);
        assert_eq!(summary.vs_prior_year.baseline, Baseline::PriorYearActual);
        assert!(summary.vs_prior_year.growth.has_baseline);
        assert!(close(summary.vs_prior_year.growth.pct, 380.0));
    }

    #[test]
    fn test_annual_comparison_names_its_baseline() {
        let store = store();
        let vs_actual = annual_comparison(&store, 2024, Baseline::PriorYearActual).unwrap();
        assert_eq!(vs_actual.current, 1400.0);
        assert_eq!(vs_actual.prior, 250.0);
        let vs_target = annual_comparison(&store, 2024, Baseline::PriorYearTarget).unwrap();
        assert_eq!(vs_target.prior, 500.0);
        assert_eq!(vs_target.baseline, Baseline::PriorYearTarget);
        assert!(close(vs_target.growth.pct, 180.0));
    }

    #[test]
    fn test_monthly_breakdown_without_prior_data() {
        let store = store();
        let rows = monthly_breakdown(&store, &Period::new(2024, [2, 1]).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, 1);
        assert_eq!(rows[0].total_sales, 1200.0);
        assert_eq!(rows[1].month, 2);
        assert_eq!(rows[1].total_sales, 200.0);
        assert_eq!(rows[1].achievement_pct, 50.0);
        assert_eq!(rows[1].vs_prior_year.growth.status(), GrowthStatus::NoBaseline);
    }

    #[test]
    fn test_baseline_and_rank_parsing() {
        assert_eq!("target".parse::<Baseline>().unwrap(), Baseline::PriorYearTarget);
        assert_eq!("Actual".parse::<Baseline>().unwrap(), Baseline::PriorYearActual);
        assert!("budget".parse::<Baseline>().is_err());
        assert_eq!("sales".parse::<RankBy>().unwrap(), RankBy::Sales);
        assert!("speed".parse::<RankBy>().is_err());
    }
}
