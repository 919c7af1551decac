use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dashboards::d400_executive_summary::Totals;

/// Request for the store dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreMonthlyRequest {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

/// Sales and customers of one store inside one month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreMonthFigures {
    pub sales: f64,
    pub customers: f64,
}

/// One month of the stacked by-store chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStorePoint {
    pub month: u32,
    /// Per-store figures keyed by store id
    pub stores: BTreeMap<String, StoreMonthFigures>,
    /// Grand total over all stores
    pub total_sales: f64,
    pub total_customers: f64,
}

/// Sparse by-store series: only months present in the data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyStoreSeries {
    pub series: Vec<MonthlyStorePoint>,
    /// Stores observed, in display order
    pub store_list: Vec<String>,
}

/// Per-month grand total across all stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: u32,
    pub total_sales: f64,
    pub customers: f64,
    pub average_ticket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRanking {
    pub store_id: String,
    pub total_sales: f64,
    pub customers: f64,
    pub average_ticket: f64,
}

/// One month of a single store's trend line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreTrendPoint {
    pub month: u32,
    pub total_sales: f64,
    pub nominated_sales: f64,
    pub free_sales: f64,
    pub product_sales: f64,
}

/// Store card: totals plus its sparse monthly trend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSummary {
    pub store_id: String,
    pub record_count: usize,
    pub totals: Totals,
    pub trend: Vec<StoreTrendPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMonthlyResponse {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub stores: Vec<StoreSummary>,
    pub monthly_series: MonthlyStoreSeries,
    /// All-store totals per month of the year
    pub monthly_totals: Vec<MonthlyTotal>,
}
