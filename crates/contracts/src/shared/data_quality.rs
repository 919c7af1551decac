use serde::{Deserialize, Serialize};

/// Why a record was left out of every aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    /// Store is missing or an unknown/error marker
    StoreUnknown,
}

impl ExclusionReason {
    pub fn description(&self) -> &'static str {
        match self {
            ExclusionReason::StoreUnknown => "store unknown/error",
        }
    }

    /// Caption shown next to the excluded row
    pub fn label(&self) -> &'static str {
        match self {
            ExclusionReason::StoreUnknown => "店舗不明/エラー",
        }
    }
}

/// A record excluded by the validity filter, kept for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedRecord {
    pub source_file: String,
    pub source_sheet: String,
    pub source_row_index: usize,
    pub store_id: Option<String>,
    pub staff_name: Option<String>,
    pub total_sales: f64,
    pub reason: ExclusionReason,
}

/// Informational report about the loaded rows; never changes aggregates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataQualityReport {
    pub total_records: usize,
    pub excluded_count: usize,
    /// Distinct records holding at least one non-numeric value in a numeric column
    pub malformed_record_count: usize,
    pub warnings: Vec<String>,
    pub excluded: Vec<ExcludedRecord>,
}

impl DataQualityReport {
    pub fn is_clean(&self) -> bool {
        self.excluded_count == 0 && self.malformed_record_count == 0
    }
}
