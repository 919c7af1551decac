use serde::{Deserialize, Serialize};

/// One workbook to load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportFile {
    /// Path on the server (xlsx/xls/ods/csv)
    pub path: String,
    /// Explicit fiscal year; inferred from the file name when absent
    #[serde(default)]
    pub year: Option<i32>,
}

/// Load a set of workbooks, replacing the current dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRequest {
    pub files: Vec<ImportFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileYear {
    pub file_name: String,
    pub year: i32,
}

/// Reassign the year of every record coming from the listed files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearReassignmentRequest {
    pub years: Vec<FileYear>,
}
