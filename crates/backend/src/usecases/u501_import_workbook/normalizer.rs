use contracts::domain::a001_sales_record::{FieldValue, NumericField, SalesRecord};
use std::collections::HashMap;

use super::error::ImportError;
use super::reader::{RawSheet, RawWorkbook};

/// Registered staff names keyed by staff code.
pub type StaffMap = HashMap<String, String>;

/// Staff name used when neither the mapping nor the sheet provides one.
pub const UNKNOWN_STAFF: &str = "不明";

/// Sheet layout options.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub data_sheet: String,
    pub staff_sheet_keywords: Vec<String>,
    pub store_sheet_names: Vec<String>,
}

/// Canonical destination of a data-sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Column {
    Year,
    Month,
    Store,
    StaffCode,
    StaffName,
    Numeric(NumericField),
}

/// Header aliases; for a column with several headers present, earlier entries win.
const COLUMN_ALIASES: &[(&str, Column)] = &[
    ("年", Column::Year),
    ("year", Column::Year),
    ("月", Column::Month),
    ("month", Column::Month),
    ("店舗CD", Column::Store),
    ("storeCode", Column::Store),
    ("店舗", Column::Store),
    ("スタッフCD", Column::StaffCode),
    ("staffCode", Column::StaffCode),
    ("スタッフ", Column::StaffName),
    ("スタッフ名", Column::StaffName),
    ("staffName", Column::StaffName),
    ("総売上", Column::Numeric(NumericField::TotalSales)),
    ("totalSales", Column::Numeric(NumericField::TotalSales)),
    ("指名売上", Column::Numeric(NumericField::NominatedSales)),
    ("nominatedSales", Column::Numeric(NumericField::NominatedSales)),
    ("フリー売上", Column::Numeric(NumericField::FreeSales)),
    ("freeSales", Column::Numeric(NumericField::FreeSales)),
    ("商品売上", Column::Numeric(NumericField::ProductSales)),
    ("商品", Column::Numeric(NumericField::ProductSales)),
    ("productSales", Column::Numeric(NumericField::ProductSales)),
    ("報酬合計", Column::Numeric(NumericField::TotalReward)),
    ("totalReward", Column::Numeric(NumericField::TotalReward)),
    ("指名報酬", Column::Numeric(NumericField::NominatedReward)),
    ("nominatedReward", Column::Numeric(NumericField::NominatedReward)),
    ("フリー報酬", Column::Numeric(NumericField::FreeReward)),
    ("freeReward", Column::Numeric(NumericField::FreeReward)),
    ("商品報酬", Column::Numeric(NumericField::ProductReward)),
    ("productReward", Column::Numeric(NumericField::ProductReward)),
    ("指名数", Column::Numeric(NumericField::NominatedCount)),
    ("nominatedCount", Column::Numeric(NumericField::NominatedCount)),
    ("出勤日数", Column::Numeric(NumericField::AttendanceDays)),
    ("attendanceDays", Column::Numeric(NumericField::AttendanceDays)),
];

/// Column positions of the data sheet, resolved from its header row.
#[derive(Debug, Default)]
struct HeaderMap {
    columns: HashMap<Column, Vec<usize>>,
}

impl HeaderMap {
    fn from_header_row(header: &[FieldValue]) -> Self {
        let names: Vec<Option<String>> = header.iter().map(FieldValue::as_text).collect();
        let mut columns: HashMap<Column, Vec<usize>> = HashMap::new();

        for (alias, column) in COLUMN_ALIASES {
            if let Some(index) = names.iter().position(|n| n.as_deref() == Some(*alias)) {
                columns.entry(*column).or_default().push(index);
            }
        }
        Self { columns }
    }

    /// First non-empty cell among the column's headers.
    fn value<'a>(&self, row: &'a [FieldValue], column: Column) -> Option<&'a FieldValue> {
        self.columns
            .get(&column)?
            .iter()
            .filter_map(|&i| row.get(i))
            .find(|v| !v.is_empty())
    }

    fn text(&self, row: &[FieldValue], column: Column) -> Option<String> {
        self.value(row, column).and_then(FieldValue::as_text)
    }
}

/// Records and side tables of one workbook.
#[derive(Debug, Clone, Default)]
pub struct ParsedFile {
    pub file_name: String,
    pub year: Option<i32>,
    pub records: Vec<SalesRecord>,
    pub staff_map: StaffMap,
    pub store_order: Vec<String>,
}

/// First four-digit `19xx`/`20xx` run in a file name ("2024年度売上.xlsx" → 2024).
pub fn extract_year_from_filename(file_name: &str) -> Option<i32> {
    let bytes = file_name.as_bytes();
    bytes.windows(4).find_map(|w| {
        let century_ok = matches!((w[0], w[1]), (b'2', b'0') | (b'1', b'9'));
        if century_ok && w.iter().all(u8::is_ascii_digit) {
            std::str::from_utf8(w).ok()?.parse().ok()
        } else {
            None
        }
    })
}

/// Staff code → registered name from the first sheet whose name contains a keyword.
///
/// Column A is the registered name, column B the code; the header row is skipped.
pub fn extract_staff_map(workbook: &RawWorkbook, keywords: &[String]) -> StaffMap {
    let Some(sheet) = workbook
        .sheets
        .iter()
        .find(|s| keywords.iter().any(|k| s.name.contains(k.as_str())))
    else {
        tracing::warn!("No staff sheet found in {}", workbook.file_name);
        return StaffMap::new();
    };

    let map: StaffMap = (1..sheet.rows.len())
        .filter_map(|row| {
            let name = sheet.cell(row, 0).as_text()?;
            let code = sheet.cell(row, 1).as_text()?;
            Some((code, name))
        })
        .collect();

    tracing::info!("Staff mapping loaded from \"{}\": {} entries", sheet.name, map.len());
    map
}

/// Store display order from column A of the store-list sheet, starting at row 2.
pub fn extract_store_order(workbook: &RawWorkbook, sheet_names: &[String]) -> Vec<String> {
    let Some(sheet) = workbook
        .sheets
        .iter()
        .find(|s| sheet_names.iter().any(|n| s.name == *n))
    else {
        tracing::warn!("No store list sheet found in {}", workbook.file_name);
        return Vec::new();
    };

    let order: Vec<String> = (1..sheet.rows.len())
        .filter_map(|row| sheet.cell(row, 0).as_text())
        .filter(|store| store != "店舗リスト")
        .collect();

    tracing::info!("Store order loaded: {}", order.join(", "));
    order
}

/// Turns a workbook into canonical records.
///
/// `year` overrides the year for every row; otherwise it is inferred from the
/// file name, falling back to the sheet's own year column.
pub fn normalize_workbook(
    workbook: &RawWorkbook,
    year: Option<i32>,
    layout: &SheetLayout,
) -> Result<ParsedFile, ImportError> {
    let staff_map = extract_staff_map(workbook, &layout.staff_sheet_keywords);
    let store_order = extract_store_order(workbook, &layout.store_sheet_names);

    let sheet = workbook
        .sheet(&layout.data_sheet)
        .ok_or_else(|| ImportError::MissingDataSheet {
            path: workbook.file_name.clone(),
            sheet: layout.data_sheet.clone(),
            available: workbook.sheet_names().join(", "),
        })?;

    let Some((header, _)) = sheet.rows.split_first() else {
        return Err(ImportError::EmptyDataSheet {
            path: workbook.file_name.clone(),
            sheet: sheet.name.clone(),
        });
    };

    let year = year.or_else(|| extract_year_from_filename(&workbook.file_name));
    let headers = HeaderMap::from_header_row(header);

    let records: Vec<SalesRecord> = sheet
        .rows
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, row)| row.iter().any(|cell| !cell.is_empty()))
        .map(|(index, row)| {
            build_record(row, &headers, &staff_map, year, &workbook.file_name, sheet, index + 1)
        })
        .collect();

    tracing::info!(
        "Parsed {} rows from {} / {} (year: {:?})",
        records.len(),
        workbook.file_name,
        sheet.name,
        year
    );

    Ok(ParsedFile {
        file_name: workbook.file_name.clone(),
        year,
        records,
        staff_map,
        store_order,
    })
}

fn build_record(
    row: &[FieldValue],
    headers: &HeaderMap,
    staff_map: &StaffMap,
    year: Option<i32>,
    file_name: &str,
    sheet: &RawSheet,
    sheet_row: usize,
) -> SalesRecord {
    let staff_id = headers.text(row, Column::StaffCode);
    let staff_name = staff_id
        .as_ref()
        .and_then(|code| staff_map.get(code).cloned())
        .or_else(|| headers.text(row, Column::StaffName))
        .or_else(|| staff_id.clone())
        .unwrap_or_else(|| UNKNOWN_STAFF.to_string());

    let year = match year {
        Some(y) => FieldValue::from(y),
        None => headers.value(row, Column::Year).cloned().unwrap_or_default(),
    };

    let mut record = SalesRecord {
        year,
        month: headers.value(row, Column::Month).cloned().unwrap_or_default(),
        store_id: headers.text(row, Column::Store),
        staff_id,
        staff_name: Some(staff_name),
        source_file: file_name.to_string(),
        source_sheet: sheet.name.clone(),
        source_row_index: sheet_row,
        ..SalesRecord::default()
    };

    for field in NumericField::ALL {
        if let Some(value) = headers.value(row, Column::Numeric(field)) {
            *record.field_mut(field) = value.clone();
        }
    }
    record
}
