//! Record builders for the aggregation tests.

use contracts::domain::a001_sales_record::{FieldValue, SalesRecord};

/// A sales line with the fields most tests care about; everything else is empty.
pub(crate) fn record(
    store: &str,
    staff: &str,
    year: i32,
    month: u32,
    total_sales: f64,
    nominated_count: f64,
) -> SalesRecord {
    SalesRecord {
        year: FieldValue::Number(year as f64),
        month: FieldValue::Number(month as f64),
        store_id: Some(store.to_string()),
        staff_id: None,
        staff_name: (!staff.is_empty()).then(|| staff.to_string()),
        total_sales: FieldValue::Number(total_sales),
        nominated_count: FieldValue::Number(nominated_count),
        source_file: "test.xlsx".to_string(),
        source_sheet: "CSV計算".to_string(),
        source_row_index: 2,
        ..SalesRecord::default()
    }
}

/// Two stores, three staff members, two years.
pub(crate) fn sample() -> Vec<SalesRecord> {
    vec![
        SalesRecord {
            nominated_sales: FieldValue::Number(600.0),
            product_sales: FieldValue::Number(100.0),
            ..record("奈良", "A", 2024, 1, 1000.0, 2.0)
        },
        SalesRecord {
            nominated_sales: FieldValue::Number(200.0),
            ..record("奈良", "A", 2024, 2, 500.0, 1.0)
        },
        SalesRecord {
            nominated_sales: FieldValue::Text("1,000".to_string()),
            product_sales: FieldValue::Number(400.0),
            ..record("生駒", "B", 2024, 1, 2000.0, 4.0)
        },
        record("生駒", "C", 2024, 2, 800.0, 1.0),
        record("奈良", "A", 2023, 1, 400.0, 1.0),
        record("#N/A", "D", 2024, 1, 9999.0, 9.0),
    ]
}
