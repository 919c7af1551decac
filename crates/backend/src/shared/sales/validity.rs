use contracts::domain::a001_sales_record::SalesRecord;
use contracts::shared::data_quality::{ExcludedRecord, ExclusionReason};

use super::numeric::to_number;

/// Exact markers the source sheets use for "no value".
const SENTINELS: [&str; 3] = ["不明", "#N/A", "#NA"];

/// Unknown/error marker: blank, `unknown`, `不明`, `#N/A`, or anything containing `ERROR`.
pub fn is_sentinel(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("unknown")
        || SENTINELS.contains(&trimmed)
        || trimmed.contains("ERROR")
}

/// A record counts toward aggregates only when its store is known.
pub fn is_valid(record: &SalesRecord) -> bool {
    match record.store_id.as_deref() {
        Some(store) => !is_sentinel(store),
        None => false,
    }
}

/// Store of a valid record.
pub fn valid_store(record: &SalesRecord) -> Option<&str> {
    if is_valid(record) {
        record.store_id.as_deref().map(str::trim)
    } else {
        None
    }
}

/// Who a record belongs to for staff-level aggregates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffIdentity {
    /// Staff code when present, otherwise the name
    pub key: String,
    pub id: Option<String>,
    /// Name to display: the name, otherwise the code
    pub name: String,
}

/// Resolves the staff identity of a record.
///
/// `None` when the record has neither code nor name (store summary rows) or
/// when the resolved name is an unknown/error marker.
pub fn staff_identity(record: &SalesRecord) -> Option<StaffIdentity> {
    let id = non_blank(record.staff_id.as_deref());
    let name = non_blank(record.staff_name.as_deref());

    let resolved_name = name.or(id)?;
    if is_sentinel(resolved_name) {
        return None;
    }
    let key = id.or(name)?;

    Some(StaffIdentity {
        key: key.to_string(),
        id: id.map(str::to_string),
        name: resolved_name.to_string(),
    })
}

/// Records the validity filter rejects, with the reason and their provenance.
pub fn excluded_records(records: &[SalesRecord]) -> Vec<ExcludedRecord> {
    records
        .iter()
        .filter(|r| !is_valid(r))
        .map(|r| ExcludedRecord {
            source_file: r.source_file.clone(),
            source_sheet: r.source_sheet.clone(),
            source_row_index: r.source_row_index,
            store_id: r.store_id.clone(),
            staff_name: r.staff_name.clone(),
            total_sales: to_number(&r.total_sales),
            reason: ExclusionReason::StoreUnknown,
        })
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::record;
    use super::*;

    #[test]
    fn test_sentinels() {
        for marker in ["", "  ", "unknown", "Unknown", "不明", "#N/A", "#REF ERROR", "ERROR"] {
            assert!(is_sentinel(marker), "{marker:?} should be a sentinel");
        }
        for store in ["奈良", "villa-B", "error-free"] {
            assert!(!is_sentinel(store), "{store:?} should not be a sentinel");
        }
    }

    #[test]
    fn test_is_valid_requires_known_store() {
        assert!(is_valid(&record("奈良", "A", 2024, 1, 1000.0, 1.0)));
        assert!(!is_valid(&record("#N/A", "A", 2024, 1, 1000.0, 1.0)));
        assert!(!is_valid(&SalesRecord {
            store_id: None,
            ..record("奈良", "A", 2024, 1, 1000.0, 1.0)
        }));
    }

    #[test]
    fn test_staff_identity_prefers_code() {
        let r = SalesRecord {
            staff_id: Some("S01".into()),
            staff_name: Some("山田".into()),
            ..record("奈良", "", 2024, 1, 0.0, 0.0)
        };
        let identity = staff_identity(&r).unwrap();
        assert_eq!(identity.key, "S01");
        assert_eq!(identity.name, "山田");
    }

    #[test]
    fn test_staff_identity_excludes_unresolvable() {
        let no_staff = SalesRecord {
            staff_id: None,
            staff_name: None,
            ..record("奈良", "", 2024, 1, 0.0, 0.0)
        };
        assert_eq!(staff_identity(&no_staff), None);

        let unknown_name = SalesRecord {
            staff_id: Some("S09".into()),
            staff_name: Some("不明".into()),
            ..record("奈良", "", 2024, 1, 0.0, 0.0)
        };
        assert_eq!(staff_identity(&unknown_name), None);

        let code_only = SalesRecord {
            staff_id: Some("S10".into()),
            staff_name: None,
            ..record("奈良", "", 2024, 1, 0.0, 0.0)
        };
        assert_eq!(staff_identity(&code_only).unwrap().name, "S10");
    }

    #[test]
    fn test_excluded_records_mirror_validity() {
        let records = vec![
            record("奈良", "A", 2024, 1, 1000.0, 1.0),
            SalesRecord {
                source_file: "2024年度.xlsx".into(),
                source_row_index: 7,
                ..record("#N/A", "B", 2024, 1, 500.0, 1.0)
            },
        ];
        let excluded = excluded_records(&records);
        assert_eq!(excluded.len(), 1);
        assert_eq!(excluded[0].source_row_index, 7);
        assert_eq!(excluded[0].total_sales, 500.0);
        assert_eq!(excluded[0].reason.description(), "store unknown/error");
    }
}
