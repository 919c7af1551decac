use contracts::domain::a001_sales_record::SalesRecord;
use std::collections::BTreeSet;

use super::numeric::{to_month, to_number, to_year};

/// Narrows records to a year and/or month; `None` passes everything through.
///
/// Comparison is numeric, so a year stored as `"2024"` matches `Some(2024)`.
/// A record without the filtered field never matches.
pub fn filter_by_period(
    records: &[SalesRecord],
    year: Option<i32>,
    month: Option<u32>,
) -> Vec<SalesRecord> {
    records
        .iter()
        .filter(|r| matches_period(r, year, month))
        .cloned()
        .collect()
}

pub fn matches_period(record: &SalesRecord, year: Option<i32>, month: Option<u32>) -> bool {
    if let Some(y) = year {
        if to_number(&record.year) != y as f64 {
            return false;
        }
    }
    if let Some(m) = month {
        if to_number(&record.month) != m as f64 {
            return false;
        }
    }
    true
}

/// Years present in the data, newest first. Looks at every row, valid or not.
pub fn available_years(records: &[SalesRecord]) -> Vec<i32> {
    let years: BTreeSet<i32> = records.iter().filter_map(|r| to_year(&r.year)).collect();
    years.into_iter().rev().collect()
}

/// Months present in the data for `year` (all years when `None`), ascending.
pub fn available_months(records: &[SalesRecord], year: Option<i32>) -> Vec<u32> {
    let months: BTreeSet<u32> = records
        .iter()
        .filter(|r| matches_period(r, year, None))
        .filter_map(|r| to_month(&r.month))
        .collect();
    months.into_iter().collect()
}
