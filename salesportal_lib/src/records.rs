//! Strongly-typed entities the engine computes over.
//!
//! These are produced only by [`crate::adapter`]; the engine never creates or
//! mutates them.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

pub use salesportal_rows::types::InvestmentStatus;

/// Stable rep identity, used as the grouping key throughout.
pub type RepId = String;

/// Backend client identifier.
pub type ClientId = String;

/// A client tax id (CNPJ/CPF) in digits-only normal form.
///
/// `"12.345.678/0001-90"` and `"12345678000190"` are the same client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    pub fn normalize(raw: &str) -> Self {
        TaxId(raw.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render with the usual CNPJ (14 digits) or CPF (11 digits) punctuation.
    /// Other lengths are shown as bare digits.
    pub fn formatted(&self) -> String {
        let d = &self.0;
        match d.len() {
            14 => format!(
                "{}.{}.{}/{}-{}",
                &d[0..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..14]
            ),
            11 => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
            _ => d.clone(),
        }
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub rep_id: RepId,
    pub client_tax_id: TaxId,
    pub client_name: Option<String>,
    /// Canonical channel name; `None` is the general bucket.
    pub channel: Option<String>,
    pub amount: f64,
    pub date: NaiveDate,
}

/// A rep's target for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetRecord {
    pub rep_id: RepId,
    pub year: i32,
    pub month: u32,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentRecord {
    pub rep_id: RepId,
    pub client_id: ClientId,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: InvestmentStatus,
}

impl InvestmentRecord {
    pub fn is_approved(&self) -> bool {
        self.status == InvestmentStatus::Approved
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rep {
    pub id: RepId,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: ClientId,
    pub tax_id: TaxId,
    pub display_name: String,
    pub owner_rep_id: RepId,
}

/// Every collection the dashboards read, already adapted.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub sales: Vec<SaleRecord>,
    pub targets: Vec<TargetRecord>,
    pub investments: Vec<InvestmentRecord>,
    pub reps: Vec<Rep>,
    pub clients: Vec<Client>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_id_formats_compare_equal() {
        assert_eq!(
            TaxId::normalize("12.345.678/0001-90"),
            TaxId::normalize("12345678000190")
        );
        assert_eq!(
            TaxId::normalize(" 12 345 678 0001 90 "),
            TaxId::normalize("12345678000190")
        );
    }

    #[test]
    fn test_tax_id_formatted_cnpj() {
        let tax_id = TaxId::normalize("12345678000190");
        assert_eq!(tax_id.formatted(), "12.345.678/0001-90");
    }

    #[test]
    fn test_tax_id_formatted_cpf() {
        let tax_id = TaxId::normalize("123.456.789-09");
        assert_eq!(tax_id.to_string(), "123.456.789-09");
    }

    #[test]
    fn test_tax_id_other_lengths_are_bare() {
        assert_eq!(TaxId::normalize("12-34").formatted(), "1234");
        assert!(TaxId::normalize("n/a").is_empty());
    }
}
