use contracts::domain::a001_sales_record::{NumericField, SalesRecord};
use contracts::shared::data_quality::DataQualityReport;

use super::numeric::is_malformed;
use super::validity::excluded_records;

/// Summarizes excluded and malformed rows. Aggregates are unaffected.
pub fn check_data_quality(records: &[SalesRecord]) -> DataQualityReport {
    let excluded = excluded_records(records);
    let malformed_record_count = records.iter().filter(|r| has_malformed_value(r)).count();

    let mut warnings = Vec::new();
    if !excluded.is_empty() {
        warnings.push(format!(
            "無効なデータ（店舗不明/ERROR）が {} 件含まれています。これらはグラフ・集計から自動的に除外されています。",
            excluded.len()
        ));
    }
    if malformed_record_count > 0 {
        warnings.push(format!(
            "数値エラーを含むデータが {} 件検出されました。",
            malformed_record_count
        ));
    }

    DataQualityReport {
        total_records: records.len(),
        excluded_count: excluded.len(),
        malformed_record_count,
        warnings,
        excluded,
    }
}

fn has_malformed_value(record: &SalesRecord) -> bool {
    NumericField::ALL
        .iter()
        .any(|field| is_malformed(record.field(*field)))
}

#[cfg(test)]
mod tests {
    use super::super::aggregate::calculate_totals;
    use super::super::fixtures::{record, sample};
    use super::*;
    use contracts::domain::a001_sales_record::FieldValue;
    use contracts::shared::data_quality::ExclusionReason;

    #[test]
    fn test_na_store_is_reported_and_excluded() {
        let records = vec![
            record("奈良", "A", 2024, 1, 1000.0, 1.0),
            record("#N/A", "B", 2024, 1, 700.0, 1.0),
        ];
        let report = check_data_quality(&records);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.excluded_count, 1);
        assert_eq!(report.excluded[0].reason, ExclusionReason::StoreUnknown);
        assert_eq!(report.excluded[0].reason.description(), "store unknown/error");
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("1 件"));
        assert_eq!(calculate_totals(&records).total_sales, 1000.0);
    }

    #[test]
    fn test_malformed_counts_distinct_records() {
        let records = vec![
            SalesRecord {
                total_sales: FieldValue::Text("#VALUE!".into()),
                free_sales: FieldValue::Text("ERROR".into()),
                ..record("奈良", "A", 2024, 1, 0.0, 1.0)
            },
            SalesRecord {
                product_reward: FieldValue::Text("#REF!".into()),
                ..record("生駒", "B", 2024, 1, 500.0, 1.0)
            },
            SalesRecord {
                nominated_sales: FieldValue::Text("1,200".into()),
                ..record("生駒", "C", 2024, 1, 500.0, 1.0)
            },
        ];
        let report = check_data_quality(&records);
        assert_eq!(report.malformed_record_count, 2);
        assert_eq!(report.excluded_count, 0);
        assert_eq!(report.warnings, vec!["数値エラーを含むデータが 2 件検出されました。"]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_clean_data() {
        let data: Vec<SalesRecord> = sample()
            .into_iter()
            .filter(|r| r.staff_name.as_deref() != Some("D"))
            .collect();
        let report = check_data_quality(&data);
        assert!(report.is_clean());
        assert!(report.warnings.is_empty());
        assert_eq!(check_data_quality(&[]), DataQualityReport::default());
    }
}
