use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw cell value
// ---------------------------------------------------------------------------

/// A cell exactly as it came out of the source sheet.
///
/// Numeric fields keep their raw form so that coercion (comma-grouped strings,
/// error markers, blanks) happens in one place on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Text form of the cell, `None` for blanks.
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Number(v as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

// ---------------------------------------------------------------------------
// Numeric fields
// ---------------------------------------------------------------------------

/// Every summable column of a sales line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
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
}

impl NumericField {
    pub const ALL: [NumericField; 10] = [
        NumericField::TotalSales,
        NumericField::NominatedSales,
        NumericField::FreeSales,
        NumericField::ProductSales,
        NumericField::TotalReward,
        NumericField::NominatedReward,
        NumericField::FreeReward,
        NumericField::ProductReward,
        NumericField::NominatedCount,
        NumericField::AttendanceDays,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NumericField::TotalSales => "total_sales",
            NumericField::NominatedSales => "nominated_sales",
            NumericField::FreeSales => "free_sales",
            NumericField::ProductSales => "product_sales",
            NumericField::TotalReward => "total_reward",
            NumericField::NominatedReward => "nominated_reward",
            NumericField::FreeReward => "free_reward",
            NumericField::ProductReward => "product_reward",
            NumericField::NominatedCount => "nominated_count",
            NumericField::AttendanceDays => "attendance_days",
        }
    }

    /// Column caption used in the source workbooks.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::TotalSales => "総売上",
            NumericField::NominatedSales => "指名売上",
            NumericField::FreeSales => "フリー売上",
            NumericField::ProductSales => "商品売上",
            NumericField::TotalReward => "報酬合計",
            NumericField::NominatedReward => "指名報酬",
            NumericField::FreeReward => "フリー報酬",
            NumericField::ProductReward => "商品報酬",
            NumericField::NominatedCount => "指名数",
            NumericField::AttendanceDays => "出勤日数",
        }
    }
}

// ---------------------------------------------------------------------------
// Sales record
// ---------------------------------------------------------------------------

/// One normalized sales line (store / staff / period) with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SalesRecord {
    #[serde(default)]
    pub year: FieldValue,
    #[serde(default)]
    pub month: FieldValue,
    #[serde(default)]
    pub store_id: Option<String>,
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub staff_name: Option<String>,

    #[serde(default)]
    pub total_sales: FieldValue,
    #[serde(default)]
    pub nominated_sales: FieldValue,
    #[serde(default)]
    pub free_sales: FieldValue,
    #[serde(default)]
    pub product_sales: FieldValue,
    #[serde(default)]
    pub total_reward: FieldValue,
    #[serde(default)]
    pub nominated_reward: FieldValue,
    #[serde(default)]
    pub free_reward: FieldValue,
    #[serde(default)]
    pub product_reward: FieldValue,
    #[serde(default)]
    pub nominated_count: FieldValue,
    #[serde(default)]
    pub attendance_days: FieldValue,

    /// File the row was read from (diagnostics only)
    #[serde(default)]
    pub source_file: String,
    #[serde(default)]
    pub source_sheet: String,
    /// 1-based sheet row; the header occupies row 1
    #[serde(default)]
    pub source_row_index: usize,
}

impl SalesRecord {
    pub fn field(&self, field: NumericField) -> &FieldValue {
        match field {
            NumericField::TotalSales => &self.total_sales,
            NumericField::NominatedSales => &self.nominated_sales,
            NumericField::FreeSales => &self.free_sales,
            NumericField::ProductSales => &self.product_sales,
            NumericField::TotalReward => &self.total_reward,
            NumericField::NominatedReward => &self.nominated_reward,
            NumericField::FreeReward => &self.free_reward,
            NumericField::ProductReward => &self.product_reward,
            NumericField::NominatedCount => &self.nominated_count,
            NumericField::AttendanceDays => &self.attendance_days,
        }
    }

    pub fn field_mut(&mut self, field: NumericField) -> &mut FieldValue {
        match field {
            NumericField::TotalSales => &mut self.total_sales,
            NumericField::NominatedSales => &mut self.nominated_sales,
            NumericField::FreeSales => &mut self.free_sales,
            NumericField::ProductSales => &mut self.product_sales,
            NumericField::TotalReward => &mut self.total_reward,
            NumericField::NominatedReward => &mut self.nominated_reward,
            NumericField::FreeReward => &mut self.free_reward,
            NumericField::ProductReward => &mut self.product_reward,
            NumericField::NominatedCount => &mut self.nominated_count,
            NumericField::AttendanceDays => &mut self.attendance_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_untagged_serde() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"[1000, "1,000", null]"#).unwrap();
        assert_eq!(values[0], FieldValue::Number(1000.0));
        assert_eq!(values[1], FieldValue::Text("1,000".to_string()));
        assert_eq!(values[2], FieldValue::Empty);
    }

    #[test]
    fn test_as_text_drops_integer_fraction() {
        assert_eq!(FieldValue::Number(1203.0).as_text(), Some("1203".to_string()));
        assert_eq!(FieldValue::Text("  ".into()).as_text(), None);
        assert_eq!(FieldValue::Empty.as_text(), None);
    }

    #[test]
    fn test_record_deserializes_with_missing_fields() {
        let record: SalesRecord =
            serde_json::from_str(r#"{"store_id": "奈良", "total_sales": "12,000"}"#).unwrap();
        assert_eq!(record.store_id.as_deref(), Some("奈良"));
        assert_eq!(
            record.field(NumericField::TotalSales),
            &FieldValue::Text("12,000".to_string())
        );
        assert!(record.year.is_empty());
    }
}
