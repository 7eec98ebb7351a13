//! Validation boundary between backend rows and engine records.
//!
//! Rows arrive loosely typed: amounts as numbers or localized strings, dates
//! as plain dates or timestamps, channels as free text. Everything is checked
//! here, once, so the engine can assume well-formed input. The first bad row
//! fails the whole load; nothing is silently coerced to zero.

use std::sync::OnceLock;

use regex::Regex;
use salesportal_rows::types::{
    parse_row_date, ClientRow, InvestmentRow, RawAmount, SaleRow, Snapshot, TargetRow, UserRow,
};

use crate::channel_alias::{load_channel_aliases, ChannelAliases};
use crate::error::EngineError;
use crate::records::{
    Client, InvestmentRecord, RecordSet, Rep, SaleRecord, TargetRecord, TaxId,
};

/// Why a single row was rejected, before the collection and index are known.
#[derive(Debug)]
enum RowFault {
    Amount(f64),
    Malformed(String),
}

impl RowFault {
    fn into_error(self, collection: &'static str, index: usize) -> EngineError {
        match self {
            RowFault::Amount(value) => {
                EngineError::invalid_amount(format!("{} row {}", collection, index), value)
            }
            RowFault::Malformed(reason) => EngineError::InvalidRow {
                collection,
                index,
                reason,
            },
        }
    }
}

/// Text notations accepted for money columns.
struct AmountForms {
    /// Brazilian: `1.234.567`, `1.234,56`, `1234,56`, `200`.
    grouped: Regex,
    /// Point decimal without grouping: `1234.56`, `200.00`.
    point_decimal: Regex,
}

fn amount_forms() -> Result<&'static AmountForms, RowFault> {
    static FORMS: OnceLock<Result<AmountForms, regex::Error>> = OnceLock::new();
    FORMS
        .get_or_init(|| {
            Ok(AmountForms {
                grouped: Regex::new(r"^(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d+))?$")?,
                point_decimal: Regex::new(r"^\d+\.\d+$")?,
            })
        })
        .as_ref()
        .map_err(|e| RowFault::Malformed(format!("amount pattern failed to compile: {}", e)))
}

/// Read the text form of a money column.
///
/// Dots followed by exactly three digits group thousands; a comma marks the
/// decimals. Without a comma, a single dot that does not group thousands is
/// a decimal point. Anything else, such as `1,234.56`, is rejected rather
/// than guessed at.
fn parse_amount_text(text: &str) -> Result<f64, RowFault> {
    let malformed = || RowFault::Malformed(format!("unreadable amount '{}'", text));
    let cleaned: String = text
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let (negative, digits) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };

    let forms = amount_forms()?;
    let normalized = if let Some(caps) = forms.grouped.captures(digits) {
        let whole = caps[1].replace('.', "");
        match caps.get(2) {
            Some(decimals) => format!("{}.{}", whole, decimals.as_str()),
            None => whole,
        }
    } else if forms.point_decimal.is_match(digits) {
        digits.to_string()
    } else {
        return Err(malformed());
    };

    let value = normalized.parse::<f64>().map_err(|_| malformed())?;
    Ok(if negative { -value } else { value })
}

/// Parse a money column. Non-finite or negative values are rejected as
/// amounts, unreadable text as malformed.
fn parse_amount(raw: &RawAmount) -> Result<f64, RowFault> {
    let value = match raw {
        RawAmount::Number(n) => *n,
        RawAmount::Text(text) => parse_amount_text(text)?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(RowFault::Amount(value));
    }
    Ok(value)
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate, RowFault> {
    parse_row_date(raw).ok_or_else(|| RowFault::Malformed(format!("unreadable date '{}'", raw)))
}

fn required(field: &str, value: &str) -> Result<String, RowFault> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RowFault::Malformed(format!("{} is empty", field)));
    }
    Ok(trimmed.to_string())
}

fn required_tax_id(raw: &str) -> Result<TaxId, RowFault> {
    let tax_id = TaxId::normalize(raw);
    if tax_id.is_empty() {
        return Err(RowFault::Malformed(format!("cnpj '{}' has no digits", raw)));
    }
    Ok(tax_id)
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Maps backend rows into engine records.
#[derive(Debug, Clone, Default)]
pub struct Adapter {
    channels: ChannelAliases,
}

impl Adapter {
    pub fn new(channels: ChannelAliases) -> Self {
        Self { channels }
    }

    /// Adapter using the embedded channel alias seed.
    pub fn with_seed_aliases() -> Result<Self, EngineError> {
        Ok(Self::new(load_channel_aliases()?))
    }

    pub fn sale_from_row(&self, index: usize, row: &SaleRow) -> Result<SaleRecord, EngineError> {
        self.sale(row).map_err(|fault| fault.into_error("vendas", index))
    }

    pub fn target_from_row(
        &self,
        index: usize,
        row: &TargetRow,
    ) -> Result<TargetRecord, EngineError> {
        target(row).map_err(|fault| fault.into_error("metas", index))
    }

    pub fn investment_from_row(
        &self,
        index: usize,
        row: &InvestmentRow,
    ) -> Result<InvestmentRecord, EngineError> {
        investment(row).map_err(|fault| fault.into_error("investimentos", index))
    }

    pub fn rep_from_row(&self, index: usize, row: &UserRow) -> Result<Rep, EngineError> {
        rep(row).map_err(|fault| fault.into_error("usuarios", index))
    }

    pub fn client_from_row(&self, index: usize, row: &ClientRow) -> Result<Client, EngineError> {
        client(row).map_err(|fault| fault.into_error("clientes", index))
    }

    pub fn sales(&self, rows: &[SaleRow]) -> Result<Vec<SaleRecord>, EngineError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.sale_from_row(i, row))
            .collect()
    }

    pub fn targets(&self, rows: &[TargetRow]) -> Result<Vec<TargetRecord>, EngineError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.target_from_row(i, row))
            .collect()
    }

    pub fn investments(&self, rows: &[InvestmentRow]) -> Result<Vec<InvestmentRecord>, EngineError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.investment_from_row(i, row))
            .collect()
    }

    pub fn reps(&self, rows: &[UserRow]) -> Result<Vec<Rep>, EngineError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.rep_from_row(i, row))
            .collect()
    }

    pub fn clients(&self, rows: &[ClientRow]) -> Result<Vec<Client>, EngineError> {
        rows.iter()
            .enumerate()
            .map(|(i, row)| self.client_from_row(i, row))
            .collect()
    }

    /// Adapt every collection of a snapshot.
    pub fn records_from_snapshot(&self, snapshot: &Snapshot) -> Result<RecordSet, EngineError> {
        let set = RecordSet {
            sales: self.sales(&snapshot.vendas)?,
            targets: self.targets(&snapshot.metas)?,
            investments: self.investments(&snapshot.investimentos)?,
            reps: self.reps(&snapshot.usuarios)?,
            clients: self.clients(&snapshot.clientes)?,
        };
        tracing::debug!(
            sales = set.sales.len(),
            targets = set.targets.len(),
            investments = set.investments.len(),
            reps = set.reps.len(),
            clients = set.clients.len(),
            "rows adapted"
        );
        Ok(set)
    }

    fn sale(&self, row: &SaleRow) -> Result<SaleRecord, RowFault> {
        Ok(SaleRecord {
            rep_id: required("usuario_id", &row.usuario_id)?,
            client_tax_id: required_tax_id(&row.cnpj)?,
            client_name: optional_text(row.cliente_nome.as_deref()),
            channel: self.channels.resolve(row.canal_vendas.as_deref()),
            amount: parse_amount(&row.faturamento)?,
            date: parse_date(&row.data)?,
        })
    }
}

fn target(row: &TargetRow) -> Result<TargetRecord, RowFault> {
    let year = i32::try_from(row.ano)
        .map_err(|_| RowFault::Malformed(format!("year {} out of range", row.ano)))?;
    let month = u32::try_from(row.mes)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or_else(|| RowFault::Malformed(format!("month {} is not 1-12", row.mes)))?;
    Ok(TargetRecord {
        rep_id: required("usuario_id", &row.usuario_id)?,
        year,
        month,
        amount: parse_amount(&row.valor)?,
    })
}

fn investment(row: &InvestmentRow) -> Result<InvestmentRecord, RowFault> {
    Ok(InvestmentRecord {
        rep_id: required("usuario_id", &row.usuario_id)?,
        client_id: required("cliente_id", &row.cliente_id)?,
        amount: parse_amount(&row.valor_total_investimento)?,
        date: parse_date(&row.data)?,
        status: row.status,
    })
}

fn rep(row: &UserRow) -> Result<Rep, RowFault> {
    let id = required("id", &row.id)?;
    let display_name = optional_text(Some(&row.nome)).unwrap_or_else(|| id.clone());
    Ok(Rep { id, display_name })
}

fn client(row: &ClientRow) -> Result<Client, RowFault> {
    let tax_id = required_tax_id(&row.cnpj)?;
    let display_name = optional_text(Some(&row.nome)).unwrap_or_else(|| tax_id.formatted());
    Ok(Client {
        id: required("id", &row.id)?,
        tax_id,
        display_name,
        owner_rep_id: required("usuario_id", &row.usuario_id)?,
    })
}
