use serde::{Deserialize, Serialize};

/// A workbook that made it into the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedFile {
    pub file_name: String,
    pub year: Option<i32>,
    pub row_count: usize,
}

/// A workbook that could not be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub files: Vec<LoadedFile>,
    pub failed: Vec<FailedFile>,
    pub record_count: usize,
    pub staff_mapping_count: usize,
    pub store_order: Vec<String>,
    /// RFC 3339 timestamp of the snapshot
    pub loaded_at: String,
}
