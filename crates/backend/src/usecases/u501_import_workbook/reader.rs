use calamine::{open_workbook_auto, Data, Reader};
use contracts::domain::a001_sales_record::FieldValue;
use std::path::Path;

use super::error::ImportError;

/// One sheet as a grid of raw cells; row 0 is sheet row 1, column 0 is column A.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub rows: Vec<Vec<FieldValue>>,
}

impl RawSheet {
    pub fn cell(&self, row: usize, col: usize) -> &FieldValue {
        static EMPTY: FieldValue = FieldValue::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RawWorkbook {
    /// File name without directories, used as record provenance
    pub file_name: String,
    pub sheets: Vec<RawSheet>,
}

impl RawWorkbook {
    pub fn sheet(&self, name: &str) -> Option<&RawSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Reads every sheet of a spreadsheet, or a CSV file as a single sheet named `csv_sheet_name`.
pub fn read_workbook(path: &Path, csv_sheet_name: &str) -> Result<RawWorkbook, ImportError> {
    let display = path.display().to_string();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| display.clone());
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let sheets = match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => read_spreadsheet(path)?,
        Some("csv") => {
            let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
                path: display.clone(),
                source,
            })?;
            let text = String::from_utf8_lossy(&bytes);
            let sheet = read_csv_text(&text, csv_sheet_name).map_err(|source| ImportError::Csv {
                path: display.clone(),
                source,
            })?;
            vec![sheet]
        }
        _ => return Err(ImportError::UnsupportedExtension { path: display }),
    };

    tracing::info!("Read {} sheet(s) from {}", sheets.len(), file_name);
    Ok(RawWorkbook { file_name, sheets })
}

fn read_spreadsheet(path: &Path) -> Result<Vec<RawSheet>, ImportError> {
    let display = path.display().to_string();
    let workbook_error = |source| ImportError::Workbook {
        path: display.clone(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let mut sheets = Vec::new();

    for name in workbook.sheet_names() {
        let range = workbook.worksheet_range(&name).map_err(workbook_error)?;

        // The used range may not start at A1; pad so indices match sheet positions.
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<FieldValue>> = vec![Vec::new(); row_offset];
        for row in range.rows() {
            let mut cells = vec![FieldValue::Empty; col_offset];
            cells.extend(row.iter().map(cell_value));
            rows.push(cells);
        }

        sheets.push(RawSheet { name, rows });
    }

    Ok(sheets)
}

fn cell_value(cell: &Data) -> FieldValue {
    match cell {
        Data::String(v) => text_cell(v),
        Data::Float(v) => FieldValue::Number(*v),
        Data::Int(v) => FieldValue::Number(*v as f64),
        Data::Bool(v) => FieldValue::Text(v.to_string()),
        Data::DateTime(v) => FieldValue::Text(v.to_string()),
        Data::DateTimeIso(v) => text_cell(v),
        Data::DurationIso(v) => text_cell(v),
        Data::Error(v) => FieldValue::Text(v.to_string()),
        Data::Empty => FieldValue::Empty,
    }
}

fn text_cell(value: &str) -> FieldValue {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        FieldValue::Empty
    } else {
        FieldValue::Text(trimmed.to_string())
    }
}

/// Parses CSV text (header row included) into a sheet.
pub fn read_csv_text(text: &str, sheet_name: &str) -> Result<RawSheet, csv::Error> {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(text_cell).collect());
    }

    Ok(RawSheet {
        name: sheet_name.to_string(),
        rows,
    })
}
