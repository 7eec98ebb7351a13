//! Period selection and filtering.
//!
//! A period is a year plus a set of calendar months. Every date comparison
//! uses the UTC calendar year and month of the record; there is no local
//! timezone anywhere in the engine.

use std::collections::BTreeSet;

use chrono::Datelike;
use serde::Serialize;

use crate::error::EngineError;
use crate::records::{InvestmentRecord, SaleRecord, TargetRecord};

/// Records that belong to a calendar (year, month).
pub trait Periodic {
    fn year_month(&self) -> (i32, u32);
}

impl Periodic for SaleRecord {
    fn year_month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

impl Periodic for InvestmentRecord {
    fn year_month(&self) -> (i32, u32) {
        (self.date.year(), self.date.month())
    }
}

impl Periodic for TargetRecord {
    fn year_month(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

impl<T: Periodic> Periodic for &T {
    fn year_month(&self) -> (i32, u32) {
        (*self).year_month()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    year: i32,
    months: BTreeSet<u32>,
}

impl Period {
    /// A period over `months` of `year`. Months must be 1-12; an empty set
    /// is valid and selects nothing.
    pub fn new(year: i32, months: impl IntoIterator<Item = u32>) -> Result<Self, EngineError> {
        let months: BTreeSet<u32> = months.into_iter().collect();
        if let Some(bad) = months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(EngineError::InvalidInput(format!(
                "month {} is not between 1 and 12",
                bad
            )));
        }
        Ok(Self { year, months })
    }

    pub fn full_year(year: i32) -> Self {
        Self {
            year,
            months: (1..=12).collect(),
        }
    }

    /// January through `month` of `year`.
    pub fn through_month(year: i32, month: u32) -> Result<Self, EngineError> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidInput(format!(
                "month {} is not between 1 and 12",
                month
            )));
        }
        Self::new(year, 1..=month)
    }

    /// The same months one year earlier.
    pub fn prior_year(&self) -> Self {
        Self {
            year: self.year - 1,
            months: self.months.clone(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn months(&self) -> &BTreeSet<u32> {
        &self.months
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn contains(&self, year: i32, month: u32) -> bool {
        year == self.year && self.months.contains(&month)
    }

    /// Short label such as `2024 jan-mar` or `2024 jan,mar`.
    pub fn label(&self) -> String {
        const NAMES: [&str; 12] = [
            "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
        ];
        let name = |m: u32| NAMES[(m - 1) as usize];
        let months: Vec<u32> = self.months.iter().copied().collect();
        let body = match months.as_slice() {
            [] => "-".to_string(),
            [only] => name(*only).to_string(),
            [first, .., last] if (last - first) as usize == months.len() - 1 => {
                if months.len() == 12 {
                    "ano".to_string()
                } else {
                    format!("{}-{}", name(*first), name(*last))
                }
            }
            _ => months.iter().map(|m| name(*m)).collect::<Vec<_>>().join(","),
        };
        format!("{} {}", self.year, body)
    }
}

/// A period as picked on screen, where the year may still be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeriodSelection {
    pub year: Option<i32>,
    pub months: Vec<u32>,
}

impl TryFrom<PeriodSelection> for Period {
    type Error = EngineError;

    fn try_from(selection: PeriodSelection) -> Result<Self, Self::Error> {
        let year = selection.year.ok_or(EngineError::MissingPeriod)?;
        Period::new(year, selection.months)
    }
}

/// Records falling inside `period`, as a new collection.
pub fn filter_by_period<T: Periodic + Clone>(records: &[T], period: &Period) -> Vec<T> {
    let selected: Vec<T> = records
        .iter()
        .filter(|r| {
            let (year, month) = r.year_month();
            period.contains(year, month)
        })
        .cloned()
        .collect();
    tracing::debug!(
        period = %period.label(),
        input = records.len(),
        selected = selected.len(),
        "filtered by period"
    );
    selected
}
