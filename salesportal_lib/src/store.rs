//! The Record Store: the read-only collections every aggregation reads.
//!
//! A store is loaded once per report, never mutated, and shared by reference.
//! Loading goes through [`fetch_all`] so pagination stays invisible to the
//! engine. Apart from lookups, the store computes nothing.

use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use salesportal_rows::types::{ClientRow, InvestmentRow, SaleRow, Snapshot, TargetRow, UserRow};
use salesportal_rows::{fetch_all, InMemorySource, PageQuery, PageSource};

use crate::adapter::Adapter;
use crate::error::EngineError;
use crate::records::{
    Client, InvestmentRecord, RecordSet, Rep, RepId, SaleRecord, TargetRecord, TaxId,
};

/// Minimum similarity for a rep suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// What to pull from the backend when loading a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    pub rep_id: Option<RepId>,
    pub years: Option<RangeInclusive<i32>>,
    pub page_size: Option<i64>,
}

impl StoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rep(mut self, rep_id: impl Into<RepId>) -> Self {
        self.rep_id = Some(rep_id.into());
        self
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = Some(years);
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    fn to_query(&self) -> Result<PageQuery, EngineError> {
        let mut query = PageQuery::new();
        if let Some(size) = self.page_size {
            query = query.with_page_size(size);
        }
        if let Some(rep) = &self.rep_id {
            query = query.with_rep(rep.clone());
        }
        if let Some(years) = &self.years {
            let from = NaiveDate::from_ymd_opt(*years.start(), 1, 1);
            let to = NaiveDate::from_ymd_opt(*years.end(), 12, 31);
            match (from, to) {
                (Some(from), Some(to)) => query = query.with_date_range(from, to),
                _ => {
                    return Err(EngineError::InvalidInput(format!(
                        "year range {}..={} is out of range",
                        years.start(),
                        years.end()
                    )))
                }
            }
        }
        Ok(query)
    }
}

/// One page source per backend collection.
pub struct StoreSources<'a> {
    pub sales: &'a dyn PageSource<SaleRow>,
    pub targets: &'a dyn PageSource<TargetRow>,
    pub investments: &'a dyn PageSource<InvestmentRow>,
    pub users: &'a dyn PageSource<UserRow>,
    pub clients: &'a dyn PageSource<ClientRow>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    sales: Vec<SaleRecord>,
    targets: Vec<TargetRecord>,
    investments: Vec<InvestmentRecord>,
    reps: Vec<Rep>,
    clients: Vec<Client>,
    rep_index: HashMap<RepId, usize>,
    client_index: HashMap<TaxId, usize>,
}

impl RecordStore {
    pub fn new(records: RecordSet) -> Self {
        let rep_index = records
            .reps
            .iter()
            .enumerate()
            .map(|(i, rep)| (rep.id.clone(), i))
            .collect();

        let mut client_index = HashMap::new();
        for (i, client) in records.clients.iter().enumerate() {
            if client_index.insert(client.tax_id.clone(), i).is_some() {
                tracing::warn!(tax_id = %client.tax_id, "tax id registered to more than one client");
            }
        }

        warn_duplicate_targets(&records.targets);

        Self {
            sales: records.sales,
            targets: records.targets,
            investments: records.investments,
            reps: records.reps,
            clients: records.clients,
            rep_index,
            client_index,
        }
    }

    /// Pull every collection through its page source and adapt it.
    pub fn load(
        sources: &StoreSources<'_>,
        filter: &StoreFilter,
        adapter: &Adapter,
    ) -> Result<Self, EngineError> {
        let query = filter.to_query()?;
        // The rep roster and client list are lookup tables: never scoped by
        // date or rep
        let unscoped = PageQuery {
            rep_id: None,
            from: None,
            to: None,
            ..query.clone()
        };

        let records = RecordSet {
            sales: adapter.sales(&fetch_all(sources.sales, &query)?)?,
            targets: adapter.targets(&fetch_all(sources.targets, &query)?)?,
            investments: adapter.investments(&fetch_all(sources.investments, &query)?)?,
            reps: adapter.reps(&fetch_all(sources.users, &unscoped)?)?,
            clients: adapter.clients(&fetch_all(sources.clients, &unscoped)?)?,
        };

        tracing::info!(
            sales = records.sales.len(),
            targets = records.targets.len(),
            investments = records.investments.len(),
            reps = records.reps.len(),
            clients = records.clients.len(),
            rep = filter.rep_id.as_deref().unwrap_or("all"),
            "record store loaded"
        );

        Ok(Self::new(records))
    }

    /// Load from a full snapshot dump, applying `filter` as the backend would.
    pub fn from_snapshot(
        snapshot: Snapshot,
        filter: &StoreFilter,
        adapter: &Adapter,
    ) -> Result<Self, EngineError> {
        let sales = InMemorySource::new(snapshot.vendas);
        let targets = InMemorySource::new(snapshot.metas);
        let investments = InMemorySource::new(snapshot.investimentos);
        let users = InMemorySource::new(snapshot.usuarios);
        let clients = InMemorySource::new(snapshot.clientes);
        let sources = StoreSources {
            sales: &sales,
            targets: &targets,
            investments: &investments,
            users: &users,
            clients: &clients,
        };
        Self::load(&sources, filter, adapter)
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn targets(&self) -> &[TargetRecord] {
        &self.targets
    }

    pub fn investments(&self) -> &[InvestmentRecord] {
        &self.investments
    }

    pub fn reps(&self) -> &[Rep] {
        &self.reps
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn rep(&self, id: &str) -> Option<&Rep> {
        self.rep_index.get(id).map(|&i| &self.reps[i])
    }

    /// Display name of a rep, falling back to the id for unknown reps.
    pub fn rep_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.rep(id).map(|r| r.display_name.as_str()).unwrap_or(id)
    }

    pub fn client_by_tax_id(&self, tax_id: &TaxId) -> Option<&Client> {
        self.client_index.get(tax_id).map(|&i| &self.clients[i])
    }

    pub fn clients_owned_by(&self, rep_id: &str) -> Vec<&Client> {
        self.clients
            .iter()
            .filter(|c| c.owner_rep_id == rep_id)
            .collect()
    }

    /// Name to show for a sale's client: the name on the sale, then the
    /// client roster, then the formatted tax id.
    pub fn client_display_name(&self, sale: &SaleRecord) -> String {
        if let Some(name) = &sale.client_name {
            return name.clone();
        }
        self.client_by_tax_id(&sale.client_tax_id)
            .map(|c| c.display_name.clone())
            .unwrap_or_else(|| sale.client_tax_id.formatted())
    }

    /// Every rep id that matters for per-rep reports: the roster in order,
    /// then reps that only show up in sales, targets or investments.
    pub fn rep_ids(&self) -> Vec<RepId> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut ids = Vec::new();
        let from_data = self
            .sales
            .iter()
            .map(|s| s.rep_id.as_str())
            .chain(self.targets.iter().map(|t| t.rep_id.as_str()))
            .chain(self.investments.iter().map(|i| i.rep_id.as_str()));
        for id in self.reps.iter().map(|r| r.id.as_str()).chain(from_data) {
            if seen.insert(id) {
                ids.push(id.to_string());
            }
        }
        ids
    }

    /// A new store holding only `rep_id`'s sales, targets and investments.
    /// The rep roster and client list are kept whole for name lookups; use
    /// [`RecordStore::clients_owned_by`] for the rep's own portfolio.
    pub fn for_rep(&self, rep_id: &str) -> Self {
        Self::new(RecordSet {
            sales: self
                .sales
                .iter()
                .filter(|s| s.rep_id == rep_id)
                .cloned()
                .collect(),
            targets: self
                .targets
                .iter()
                .filter(|t| t.rep_id == rep_id)
                .cloned()
                .collect(),
            investments: self
                .investments
                .iter()
                .filter(|i| i.rep_id == rep_id)
                .cloned()
                .collect(),
            reps: self.reps.clone(),
            clients: self.clients.clone(),
        })
    }

    /// Closest roster entry to a mistyped rep id or name.
    pub fn suggest_rep(&self, input: &str) -> Option<&Rep> {
        let needle = input.trim().to_lowercase();
        self.reps
            .iter()
            .map(|rep| {
                let by_id = strsim::jaro_winkler(&needle, &rep.id.to_lowercase());
                let by_name = strsim::jaro_winkler(&needle, &rep.display_name.to_lowercase());
                (by_id.max(by_name), rep)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, rep)| rep)
    }
}

fn warn_duplicate_targets(targets: &[TargetRecord]) {
    let mut seen: HashSet<(&str, i32, u32)> = HashSet::new();
    for target in targets {
        if !seen.insert((target.rep_id.as_str(), target.year, target.month)) {
            tracing::warn!(
                rep_id = %target.rep_id,
                year = target.year,
                month = target.month,
                "duplicate target for rep and month; both will be summed"
            );
        }
    }
}
