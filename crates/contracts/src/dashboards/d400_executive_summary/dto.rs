use serde::{Deserialize, Serialize};

use crate::dashboards::d401_store_monthly::{MonthlyStoreSeries, StoreRanking};
use crate::dashboards::d402_personal::{RankedStaff, RankingMetric};
use crate::shared::data_quality::DataQualityReport;

/// Request for the executive summary dashboard.
/// `year = None` selects the most recent year present in the data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutiveSummaryRequest {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

/// Totals over valid records; `total_customers` is the nomination count.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Totals {
    pub total_sales: f64,
    pub total_customers: f64,
    pub average_ticket: f64,
}

/// Secondary KPIs shown under the headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SupplementaryMetrics {
    pub total_customers: f64,
    pub average_ticket: f64,
    /// Nominated sales / total sales over the whole period, in percent
    pub average_nomination_rate: f64,
}

/// Year-over-year comparison for a year or a single month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoyComparison {
    pub current_year: i32,
    pub current_total: f64,
    pub previous_year: i32,
    pub previous_total: f64,
    /// Percentage change, 0 when the previous period has no sales
    pub yoy_rate: f64,
    pub is_positive: bool,
}

/// Month-over-month comparison; January compares with December of the previous year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomComparison {
    pub current_year: i32,
    pub current_month: u32,
    pub current_total: f64,
    pub previous_year: i32,
    pub previous_month: u32,
    pub previous_total: f64,
    pub mom_rate: f64,
    pub is_positive: bool,
}

/// TOP-N leaderboard for one metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingBoard {
    pub metric: RankingMetric,
    pub title: String,
    pub entries: Vec<RankedStaff>,
}

/// Response for the executive summary dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutiveSummaryResponse {
    /// Resolved year (`None` only when no data is loaded)
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// Totals for the selected period
    pub totals: Totals,
    pub supplementary: SupplementaryMetrics,
    pub annual_total: f64,
    /// 0 when no month is selected
    pub monthly_total: f64,
    pub yoy: Option<YoyComparison>,
    pub mom: Option<MomComparison>,
    /// Target used for the achievement ratio (monthly when a month is selected)
    pub target: f64,
    pub target_achievement: f64,
    pub top3: Vec<RankingBoard>,
    pub store_rankings: Vec<StoreRanking>,
    pub monthly_series: MonthlyStoreSeries,
    pub data_quality: DataQualityReport,
}
