use serde::{Deserialize, Serialize};

use crate::domain::a001_sales_record::NumericField;

/// Metric a staff leaderboard can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    TotalSales,
    NominatedSales,
    FreeSales,
    ProductSales,
    TotalReward,
    NominatedReward,
    FreeReward,
    ProductReward,
    NominatedCount,
    AttendanceDays,
    /// Derived: total sales / nominated count
    AverageTicket,
}

impl RankingMetric {
    /// Underlying column, `None` for derived metrics.
    pub fn as_field(&self) -> Option<NumericField> {
        match self {
            RankingMetric::TotalSales => Some(NumericField::TotalSales),
            RankingMetric::NominatedSales => Some(NumericField::NominatedSales),
            RankingMetric::FreeSales => Some(NumericField::FreeSales),
            RankingMetric::ProductSales => Some(NumericField::ProductSales),
            RankingMetric::TotalReward => Some(NumericField::TotalReward),
            RankingMetric::NominatedReward => Some(NumericField::NominatedReward),
            RankingMetric::FreeReward => Some(NumericField::FreeReward),
            RankingMetric::ProductReward => Some(NumericField::ProductReward),
            RankingMetric::NominatedCount => Some(NumericField::NominatedCount),
            RankingMetric::AttendanceDays => Some(NumericField::AttendanceDays),
            RankingMetric::AverageTicket => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self.as_field() {
            Some(field) => field.label(),
            None => "客単価",
        }
    }
}

/// Request for the personal dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalRequest {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub metric: RankingMetric,
    /// Restrict the ranking to one store; `None` = all stores
    #[serde(default)]
    pub store: Option<String>,
    /// Staff code or name whose 12-month trend is requested
    #[serde(default)]
    pub staff: Option<String>,
}

/// Per-staff sums over a period with derived ratios.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StaffAnnual {
    pub staff_id: Option<String>,
    pub staff_name: Option<String>,
    pub total_sales: f64,
    pub nominated_sales: f64,
    pub free_sales: f64,
    pub product_sales: f64,
    pub total_reward: f64,
    pub nominated_reward: f64,
    pub free_reward: f64,
    pub product_reward: f64,
    pub nominated_count: f64,
    pub attendance_days: f64,
    pub average_ticket: f64,
    /// Nominated share of total sales, in percent
    pub nomination_rate: f64,
}

/// One leaderboard line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStaff {
    /// 1-based position
    pub rank: usize,
    /// Grouping key: staff code, or the name when no code is present
    pub staff_key: String,
    pub staff_id: Option<String>,
    pub staff_name: String,
    /// Store of the last record seen for this staff member
    pub store_id: Option<String>,
    pub value: f64,
}

/// One month of a staff member's dense 12-month trend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndividualTrendPoint {
    pub month: u32,
    pub total_sales: f64,
    pub nominated_sales: f64,
    pub nominated_count: f64,
    pub nomination_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalResponse {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub metric: RankingMetric,
    pub rankings: Vec<RankedStaff>,
    pub staff: Vec<StaffAnnual>,
    /// Empty when no staff member was requested
    pub trend: Vec<IndividualTrendPoint>,
    pub store_list: Vec<String>,
}
