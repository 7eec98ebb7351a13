//! Sales aggregation engine for the sales portal dashboards.
//!
//! Turns flat collections of sales, targets and investments into the metrics
//! every manager screen shows: period totals, achievement against target,
//! year-over-year growth, channel/client breakdowns and budget utilization.
//!
//! Data flows one way: backend rows go through the [`adapter`] into a
//! [`RecordStore`], are narrowed by a [`Period`], reduced by [`aggregate`],
//! grouped by [`breakdown`] and finally rendered with [`format`]. Every
//! function here is pure and synchronous; nothing caches.

pub mod adapter;
pub mod aggregate;
pub mod breakdown;
pub mod channel_alias;
pub mod config;
pub mod error;
pub mod format;
pub mod period;
pub mod records;
pub mod store;
pub mod validation;

pub use salesportal_rows;
pub use salesportal_rows::types;

pub use aggregate::{
    aggregate, budget_utilization, growth, Aggregate, Baseline, BudgetUtilization, Comparison,
    Growth, GrowthStatus, RankBy, RepPerformance,
};
pub use breakdown::{
    breakdown, breakdown_by, ByChannel, ByClient, ByMonth, ByRep, Dimension, FlatGroup, Group,
    SaleDimension, OTHER_CHANNEL,
};
pub use config::PortalConfig;
pub use error::EngineError;
pub use period::{filter_by_period, Period, PeriodSelection, Periodic};
pub use records::{
    Client, InvestmentRecord, InvestmentStatus, RecordSet, Rep, SaleRecord, TargetRecord, TaxId,
};
pub use store::{RecordStore, StoreFilter};
