pub mod d400_executive_summary;
pub mod d401_store_monthly;
pub mod d402_personal;

use serde::{Deserialize, Serialize};

/// Years and months present in the loaded data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailablePeriods {
    /// Newest first
    pub years: Vec<i32>,
    /// Months of the requested (or newest) year, ascending
    pub months: Vec<u32>,
}

/// Optional year/month narrowing shared by several endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}
