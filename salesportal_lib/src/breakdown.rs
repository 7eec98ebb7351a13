//! Nested grouping with share-of-parent percentages.
//!
//! One primitive covers every "channel, then client within channel" or
//! "rep within team" table: records are folded into groups by the first
//! dimension, each group recurses on the remaining dimensions, and every
//! group's share is relative to its parent's total (the grand total at the
//! top level).

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Datelike;
use serde::Serialize;

use crate::aggregate::share_pct;
use crate::error::EngineError;
use crate::records::SaleRecord;
use crate::store::RecordStore;

/// Group for sales without a channel.
pub const OTHER_CHANNEL: &str = "GERAL / OUTROS";

/// A grouping key over records of type `R`.
///
/// Records with the same `key` land in the same group; `label` is what gets
/// shown and is taken from the first record seen for the key.
pub trait Dimension<R> {
    fn key(&self, record: &R) -> String;

    fn label(&self, record: &R) -> String {
        self.key(record)
    }
}

impl<R, F> Dimension<R> for F
where
    F: Fn(&R) -> String,
{
    fn key(&self, record: &R) -> String {
        self(record)
    }
}

/// Sales channel, with missing channels in [`OTHER_CHANNEL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ByChannel;

impl Dimension<SaleRecord> for ByChannel {
    fn key(&self, record: &SaleRecord) -> String {
        record
            .channel
            .clone()
            .unwrap_or_else(|| OTHER_CHANNEL.to_string())
    }
}

/// Client by normalized tax id, labeled with its resolved display name.
#[derive(Debug, Clone, Copy)]
pub struct ByClient<'a> {
    pub store: &'a RecordStore,
}

impl Dimension<SaleRecord> for ByClient<'_> {
    fn key(&self, record: &SaleRecord) -> String {
        record.client_tax_id.digits().to_string()
    }

    fn label(&self, record: &SaleRecord) -> String {
        self.store.client_display_name(record)
    }
}

/// Rep by id, labeled with the rep's display name.
#[derive(Debug, Clone, Copy)]
pub struct ByRep<'a> {
    pub store: &'a RecordStore,
}

impl Dimension<SaleRecord> for ByRep<'_> {
    fn key(&self, record: &SaleRecord) -> String {
        record.rep_id.clone()
    }

    fn label(&self, record: &SaleRecord) -> String {
        self.store.rep_name(&record.rep_id).to_string()
    }
}

/// Calendar month of the sale, keyed `YYYY-MM`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByMonth;

impl Dimension<SaleRecord> for ByMonth {
    fn key(&self, record: &SaleRecord) -> String {
        format!("{:04}-{:02}", record.date.year(), record.date.month())
    }
}

/// Named sale dimensions, for picking levels from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleDimension {
    Channel,
    Client,
    Rep,
    Month,
}

impl SaleDimension {
    pub fn resolve<'a>(&self, store: &'a RecordStore) -> Box<dyn Dimension<SaleRecord> + 'a> {
        match self {
            SaleDimension::Channel => Box::new(ByChannel),
            SaleDimension::Client => Box::new(ByClient { store }),
            SaleDimension::Rep => Box::new(ByRep { store }),
            SaleDimension::Month => Box::new(ByMonth),
        }
    }
}

impl FromStr for SaleDimension {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "channel" | "canal" => Ok(SaleDimension::Channel),
            "client" | "cliente" => Ok(SaleDimension::Client),
            "rep" | "vendedor" => Ok(SaleDimension::Rep),
            "month" | "mes" | "mês" => Ok(SaleDimension::Month),
            _ => Err(EngineError::InvalidInput(format!(
                "unknown dimension '{}'. Valid values: channel, client, rep, month",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub key: String,
    pub label: String,
    pub total: f64,
    /// Share of the containing group's total (grand total at the top).
    pub share_of_parent_pct: f64,
    pub children: Vec<Group>,
}

/// A group with its nesting depth, for flat tabular output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatGroup {
    pub depth: usize,
    pub key: String,
    pub label: String,
    pub total: f64,
    pub share_of_parent_pct: f64,
}

impl Group {
    /// Pre-order walk: each group followed by its children.
    pub fn flatten(&self) -> Vec<FlatGroup> {
        let mut out = Vec::new();
        self.flatten_into(0, &mut out);
        out
    }

    fn flatten_into(&self, depth: usize, out: &mut Vec<FlatGroup>) {
        out.push(FlatGroup {
            depth,
            key: self.key.clone(),
            label: self.label.clone(),
            total: self.total,
            share_of_parent_pct: self.share_of_parent_pct,
        });
        for child in &self.children {
            child.flatten_into(depth + 1, out);
        }
    }
}

/// Flatten a whole breakdown.
pub fn flatten(groups: &[Group]) -> Vec<FlatGroup> {
    groups.iter().flat_map(Group::flatten).collect()
}

struct Bucket<'r, R> {
    key: String,
    label: String,
    total: f64,
    members: Vec<&'r R>,
}

/// Group `records` by each of `levels` in turn.
///
/// Groups at every level are ordered by descending total; equal totals keep
/// the order in which their keys first appeared. An empty `levels` slice
/// yields no groups. Non-finite or negative amounts fail with
/// `InvalidAmount`.
pub fn breakdown<R, A>(
    records: &[R],
    amount: A,
    levels: &[&dyn Dimension<R>],
) -> Result<Vec<Group>, EngineError>
where
    A: Fn(&R) -> f64,
{
    let refs: Vec<&R> = records.iter().collect();
    let groups = build(&refs, &amount, levels)?;
    tracing::debug!(
        records = records.len(),
        levels = levels.len(),
        groups = groups.len(),
        "breakdown built"
    );
    Ok(groups)
}

fn build<R>(
    records: &[&R],
    amount: &dyn Fn(&R) -> f64,
    levels: &[&dyn Dimension<R>],
) -> Result<Vec<Group>, EngineError> {
    let Some((level, rest)) = levels.split_first() else {
        return Ok(Vec::new());
    };

    let mut buckets: Vec<Bucket<'_, R>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for &record in records {
        let value = amount(record);
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::invalid_amount("breakdown", value));
        }
        let key = level.key(record);
        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                buckets.push(Bucket {
                    key: key.clone(),
                    label: level.label(record),
                    total: 0.0,
                    members: Vec::new(),
                });
                index.insert(key, buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].total += value;
        buckets[slot].members.push(record);
    }

    let parent_total: f64 = buckets.iter().map(|b| b.total).sum();

    let mut groups = buckets
        .into_iter()
        .map(|bucket| {
            Ok(Group {
                children: build(&bucket.members, amount, rest)?,
                share_of_parent_pct: share_pct(bucket.total, parent_total),
                key: bucket.key,
                label: bucket.label,
                total: bucket.total,
            })
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    // sort_by is stable: ties stay in first-seen order
    groups.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(groups)
}

/// Sales grouped by `key`, optionally split once more by `child_key`.
pub fn breakdown_by(
    sales: &[SaleRecord],
    key: &dyn Dimension<SaleRecord>,
    child_key: Option<&dyn Dimension<SaleRecord>>,
) -> Result<Vec<Group>, EngineError> {
    let mut levels = vec![key];
    levels.extend(child_key);
    breakdown(sales, |s: &SaleRecord| s.amount, &levels)
}
