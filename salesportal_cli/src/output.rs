use std::str::FromStr;

use anyhow::{bail, Result};
use salesportal_lib::aggregate::{MonthRow, PeriodSummary, PortfolioCoverage, RepBudget};
use salesportal_lib::breakdown::FlatGroup;
use salesportal_lib::format::{format_currency_brl, format_pct, format_signed_brl};
use salesportal_lib::{Comparison, GrowthStatus, RepPerformance};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => bail!(
                "unknown output format '{}'. Valid values: table, json, csv, markdown",
                s
            ),
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct SummaryRow {
    #[tabled(rename = "Period")]
    #[serde(rename = "Period")]
    period: String,
    #[tabled(rename = "Sales")]
    #[serde(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Target")]
    #[serde(rename = "Target")]
    target: String,
    #[tabled(rename = "Difference")]
    #[serde(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Achievement")]
    #[serde(rename = "Achievement")]
    achievement: String,
    #[tabled(rename = "Positivated")]
    #[serde(rename = "Positivated")]
    positivated: usize,
    #[tabled(rename = "Growth")]
    #[serde(rename = "Growth")]
    growth: String,
    #[tabled(rename = "Baseline")]
    #[serde(rename = "Baseline")]
    baseline: String,
}

#[derive(Tabled, Serialize)]
pub struct RankingRow {
    #[tabled(rename = "#")]
    #[serde(rename = "Rank")]
    rank: usize,
    #[tabled(rename = "Rep")]
    #[serde(rename = "Rep")]
    rep_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Sales")]
    #[serde(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Target")]
    #[serde(rename = "Target")]
    target: String,
    #[tabled(rename = "Difference")]
    #[serde(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Achievement")]
    #[serde(rename = "Achievement")]
    achievement: String,
    #[tabled(rename = "Positivated")]
    #[serde(rename = "Positivated")]
    positivated: usize,
}

#[derive(Tabled, Serialize)]
pub struct BreakdownRow {
    #[tabled(rename = "Level")]
    #[serde(rename = "Level")]
    level: usize,
    #[tabled(rename = "Group")]
    #[serde(rename = "Group")]
    group: String,
    #[tabled(rename = "Total")]
    #[serde(rename = "Total")]
    total: String,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
pub struct BudgetRow {
    #[tabled(rename = "Rep")]
    #[serde(rename = "Rep")]
    rep_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Annual Target")]
    #[serde(rename = "Annual Target")]
    annual_target: String,
    #[tabled(rename = "Cap")]
    #[serde(rename = "Cap")]
    cap: String,
    #[tabled(rename = "Used")]
    #[serde(rename = "Used")]
    used: String,
    #[tabled(rename = "Remaining")]
    #[serde(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used %")]
    #[serde(rename = "Used %")]
    used_pct: String,
}

#[derive(Tabled, Serialize)]
pub struct MonthlyRow {
    #[tabled(rename = "Month")]
    #[serde(rename = "Month")]
    month: String,
    #[tabled(rename = "Sales")]
    #[serde(rename = "Sales")]
    sales: String,
    #[tabled(rename = "Target")]
    #[serde(rename = "Target")]
    target: String,
    #[tabled(rename = "Achievement")]
    #[serde(rename = "Achievement")]
    achievement: String,
    #[tabled(rename = "Positivated")]
    #[serde(rename = "Positivated")]
    positivated: usize,
    #[tabled(rename = "vs Prior Year")]
    #[serde(rename = "vs Prior Year")]
    growth: String,
}

#[derive(Tabled, Serialize)]
pub struct CoverageRow {
    #[tabled(rename = "Rep")]
    #[serde(rename = "Rep")]
    rep_id: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Clients")]
    #[serde(rename = "Clients")]
    owned: usize,
    #[tabled(rename = "Positivated")]
    #[serde(rename = "Positivated")]
    positivated: usize,
    #[tabled(rename = "Coverage")]
    #[serde(rename = "Coverage")]
    coverage: String,
}

// -- Row builders --

pub fn build_summary_rows(summaries: &[PeriodSummary]) -> Result<Vec<SummaryRow>> {
    summaries
        .iter()
        .map(|s| {
            Ok(SummaryRow {
                period: s.period.clone(),
                sales: format_currency_brl(s.aggregate.total_sales)?,
                target: format_currency_brl(s.aggregate.total_target)?,
                difference: format_signed_brl(s.aggregate.difference)?,
                achievement: format_pct(s.aggregate.achievement_pct, 2)?,
                positivated: s.aggregate.positivated_count,
                growth: growth_cell(&s.vs_prior_year)?,
                baseline: s.vs_prior_year.baseline.to_string(),
            })
        })
        .collect()
}

pub fn build_ranking_rows(rows: &[RepPerformance]) -> Result<Vec<RankingRow>> {
    rows.iter()
        .map(|r| {
            Ok(RankingRow {
                rank: r.rank,
                rep_id: r.rep_id.clone(),
                name: r.rep_name.clone(),
                sales: format_currency_brl(r.total_sales)?,
                target: format_currency_brl(r.total_target)?,
                difference: format_signed_brl(r.difference)?,
                achievement: format_pct(r.achievement_pct, 2)?,
                positivated: r.positivated_count,
            })
        })
        .collect()
}

pub fn build_breakdown_rows(groups: &[FlatGroup]) -> Result<Vec<BreakdownRow>> {
    groups
        .iter()
        .map(|g| {
            Ok(BreakdownRow {
                level: g.depth + 1,
                group: format!("{}{}", "  ".repeat(g.depth), g.label),
                total: format_currency_brl(g.total)?,
                share: format_pct(g.share_of_parent_pct, 2)?,
            })
        })
        .collect()
}

pub fn build_budget_rows(budgets: &[RepBudget]) -> Result<Vec<BudgetRow>> {
    budgets
        .iter()
        .map(|b| {
            Ok(BudgetRow {
                rep_id: b.rep_id.clone(),
                name: b.rep_name.clone(),
                year: b.year,
                annual_target: format_currency_brl(b.annual_target)?,
                cap: format_currency_brl(b.utilization.cap)?,
                used: format_currency_brl(b.utilization.used)?,
                remaining: format_signed_brl(b.utilization.remaining)?,
                used_pct: format_pct(b.utilization.used_pct, 1)?,
            })
        })
        .collect()
}

pub fn build_monthly_rows(months: &[MonthRow]) -> Result<Vec<MonthlyRow>> {
    months
        .iter()
        .map(|m| {
            Ok(MonthlyRow {
                month: format!("{:04}-{:02}", m.year, m.month),
                sales: format_currency_brl(m.total_sales)?,
                target: format_currency_brl(m.total_target)?,
                achievement: format_pct(m.achievement_pct, 2)?,
                positivated: m.positivated_count,
                growth: growth_cell(&m.vs_prior_year)?,
            })
        })
        .collect()
}

pub fn build_coverage_rows(coverage: &[PortfolioCoverage]) -> Result<Vec<CoverageRow>> {
    coverage
        .iter()
        .map(|c| {
            Ok(CoverageRow {
                rep_id: c.rep_id.clone(),
                name: c.rep_name.clone(),
                owned: c.owned_clients,
                positivated: c.positivated_clients,
                coverage: format_pct(c.coverage_pct, 1)?,
            })
        })
        .collect()
}

/// Growth as shown in tables; "n/a" when the prior figure is zero.
fn growth_cell(comparison: &Comparison) -> Result<String> {
    Ok(match comparison.growth.status() {
        GrowthStatus::NoBaseline => "n/a".to_string(),
        GrowthStatus::Measured(pct) => format_pct(pct, 1)?,
    })
}

// -- Printers --

/// Render `rows` in `format`. JSON prints `data` instead, which keeps the
/// unformatted numbers (and nesting, for breakdowns).
pub fn emit<R, J>(format: OutputFormat, rows: Vec<R>, data: &J) -> Result<()>
where
    R: Tabled + Serialize,
    J: Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => print_table(rows),
        OutputFormat::Markdown => print_markdown(rows),
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Json => print_json(data),
    }
    Ok(())
}

pub fn print_table<R: Tabled>(rows: Vec<R>) {
    println!("{}", Table::new(rows));
}

pub fn print_markdown<R: Tabled>(rows: Vec<R>) {
    let mut table = Table::new(rows);
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_csv<R: Serialize>(rows: &[R]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesportal_lib::adapter::Adapter;
    use salesportal_lib::aggregate::{
        monthly_breakdown, period_summary, portfolio_coverage, rep_budget, rep_performance,
    };
    use salesportal_lib::breakdown::flatten;
    use salesportal_lib::types::Snapshot;
    use salesportal_lib::{breakdown_by, filter_by_period, Baseline, ByChannel, ByClient};
    use salesportal_lib::{Period, RecordStore, StoreFilter};

    fn load_store() -> RecordStore {
        let json = include_str!("../../salesportal_rows/tests/fixtures/snapshot.json");
        let snapshot = Snapshot::from_json_str(json).unwrap();
        let adapter = Adapter::with_seed_aliases().unwrap();
        RecordStore::from_snapshot(snapshot, &StoreFilter::new(), &adapter).unwrap()
    }

    fn jan_feb() -> Period {
        Period::new(2024, [1, 2]).unwrap()
    }

    fn csv_string<R: Serialize>(rows: &[R]) -> String {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        for row in rows {
            wtr.serialize(row).unwrap();
        }
        String::from_utf8(wtr.into_inner().unwrap()).unwrap()
    }

    // -- Output format --

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(" csv ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    // -- Row builder tests --

    #[test]
    fn test_summary_row_mapping() {
        let store = load_store();
        let summary = period_summary(&store, &jan_feb(), Baseline::PriorYearActual).unwrap();
        let rows = build_summary_rows(&[summary]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].period, "2024 jan-fev");
        assert_eq!(rows[0].sales, "R$ 2.400");
        assert_eq!(rows[0].target, "R$ 2.800");
        assert_eq!(rows[0].difference, "-R$ 400");
        assert_eq!(rows[0].achievement, "85,71%");
        assert_eq!(rows[0].positivated, 3);
        assert_eq!(rows[0].growth, "92,0%");
        assert_eq!(rows[0].baseline, "prior-year actual");
    }

    #[test]
    fn test_ranking_row_mapping() {
        let store = load_store();
        let rows = build_ranking_rows(&rep_performance(&store, &jan_feb()).unwrap()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].name, "Bruno Lima");
        assert_eq!(rows[0].achievement, "90,00%");
        assert_eq!(rows[2].rep_id, "u3");
        assert_eq!(rows[2].sales, "R$ 0");
    }

    #[test]
    fn test_breakdown_rows_indent_children() {
        let store = load_store();
        let sales = filter_by_period(store.sales(), &jan_feb());
        let by_client = ByClient { store: &store };
        let groups = breakdown_by(&sales, &ByChannel, Some(&by_client)).unwrap();
        let rows = build_breakdown_rows(&flatten(&groups)).unwrap();
        assert_eq!(rows[0].group, "ATACADO");
        assert_eq!(rows[0].level, 1);
        assert_eq!(rows[0].share, "75,00%");
        assert_eq!(rows[1].group, "  Farmácia Vida");
        assert_eq!(rows[1].level, 2);
        assert_eq!(rows[1].share, "100,00%");
    }

    #[test]
    fn test_budget_row_shows_overspend() {
        let store = load_store();
        let rows = build_budget_rows(&[rep_budget(&store, "u1", 2024).unwrap()]).unwrap();
        assert_eq!(rows[0].cap, "R$ 240");
        assert_eq!(rows[0].used, "R$ 300");
        assert_eq!(rows[0].remaining, "-R$ 60");
        assert_eq!(rows[0].used_pct, "125,0%");
    }

    #[test]
    fn test_monthly_row_without_baseline() {
        let store = load_store();
        let rows = build_monthly_rows(&monthly_breakdown(&store, &jan_feb()).unwrap()).unwrap();
        assert_eq!(rows[0].month, "2024-01");
        assert_eq!(rows[0].growth, "68,0%");
        assert_eq!(rows[1].month, "2024-02");
        assert_eq!(rows[1].growth, "n/a");
    }

    #[test]
    fn test_coverage_row_mapping() {
        let store = load_store();
        let coverage = portfolio_coverage(&store, "u1", &jan_feb()).unwrap();
        let rows = build_coverage_rows(&[coverage]).unwrap();
        assert_eq!(rows[0].owned, 3);
        assert_eq!(rows[0].positivated, 2);
        assert_eq!(rows[0].coverage, "66,7%");
    }

    // -- CSV --

    #[test]
    fn test_csv_uses_renamed_headers() {
        let store = load_store();
        let coverage = portfolio_coverage(&store, "u2", &jan_feb()).unwrap();
        let rows = build_coverage_rows(&[coverage]).unwrap();
        let out = csv_string(&rows);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Rep,Name,Clients,Positivated,Coverage"));
        assert_eq!(lines.next(), Some("u2,Bruno Lima,1,1,\"100,0%\""));
    }

    #[test]
    fn test_table_contains_headers() {
        let store = load_store();
        let rows = build_ranking_rows(&rep_performance(&store, &jan_feb()).unwrap()).unwrap();
        let rendered = Table::new(rows).to_string();
        assert!(rendered.contains("Achievement"));
        assert!(rendered.contains("Ana Souza"));
    }
}
