use chrono::Utc;
use contracts::domain::a001_sales_record::FieldValue;
use contracts::usecases::u501_import_workbook::{
    FailedFile, FileYear, ImportRequest, ImportResponse, LoadedFile,
};
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use tokio::task::JoinSet;

use super::error::ImportError;
use super::normalizer::{normalize_workbook, ParsedFile, SheetLayout, StaffMap};
use super::reader::read_workbook;
use crate::shared::config::{resolve_path, Config};
use crate::shared::dataset::Dataset;
use crate::shared::sales::grouping::StoreOrder;

/// Everything the import needs besides the file list.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub layout: SheetLayout,
    /// Used when no workbook carries a store list sheet
    pub default_store_order: StoreOrder,
}

impl ImportOptions {
    pub fn from_config(config: &Config) -> Self {
        let default_store_order = if config.stores.order.is_empty() {
            StoreOrder::default()
        } else {
            StoreOrder::new(config.stores.order.clone())
        };
        Self {
            layout: SheetLayout {
                data_sheet: config.import.data_sheet.clone(),
                staff_sheet_keywords: config.import.staff_sheet_keywords.clone(),
                store_sheet_names: config.import.store_sheet_names.clone(),
            },
            default_store_order,
        }
    }
}

/// A merged snapshot plus the summary returned to the caller.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub dataset: Dataset,
    pub response: ImportResponse,
}

/// Parses every requested file on blocking workers and merges the results.
///
/// Files that fail are logged and reported; the import itself fails only when
/// nothing could be read.
pub async fn import_files(
    request: &ImportRequest,
    options: &ImportOptions,
) -> Result<ImportOutcome, ImportError> {
    if request.files.is_empty() {
        return Err(ImportError::NoFiles);
    }
    tracing::info!("Starting import of {} file(s)", request.files.len());

    let mut tasks = JoinSet::new();
    for (position, file) in request.files.iter().enumerate() {
        let path = resolve_path(&file.path);
        let year = file.year;
        let layout = options.layout.clone();
        tasks.spawn_blocking(move || (position, parse_file(path, year, &layout)));
    }

    let mut slots: Vec<Option<Result<ParsedFile, ImportError>>> =
        (0..request.files.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((position, result)) => slots[position] = Some(result),
            Err(e) => tracing::error!("Import worker failed: {}", e),
        }
    }

    // Records and year reassignment are keyed by file name, so names must be unique.
    let mut seen: HashSet<String> = HashSet::new();
    let mut parsed = Vec::new();
    let mut failed = Vec::new();
    for (file, slot) in request.files.iter().zip(slots) {
        let result = slot
            .unwrap_or_else(|| Err(ImportError::Worker(file.path.clone())))
            .and_then(|p| {
                if seen.insert(p.file_name.clone()) {
                    Ok(p)
                } else {
                    Err(ImportError::DuplicateFileName {
                        path: file.path.clone(),
                        file_name: p.file_name,
                    })
                }
            });
        match result {
            Ok(p) => parsed.push(p),
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file.path, e);
                failed.push(FailedFile {
                    path: file.path.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    if parsed.is_empty() {
        let details = failed
            .iter()
            .map(|f| format!("{}: {}", f.path, f.error))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::error!("Import failed, no file could be read");
        return Err(ImportError::NothingImported { details });
    }

    let dataset = merge(parsed, &options.default_store_order);
    let response = describe(&dataset, failed);
    tracing::info!(
        "Import finished: {} records from {} file(s), {} failed",
        response.record_count,
        response.files.len(),
        response.failed.len()
    );

    Ok(ImportOutcome { dataset, response })
}

fn parse_file(
    path: PathBuf,
    year: Option<i32>,
    layout: &SheetLayout,
) -> Result<ParsedFile, ImportError> {
    let workbook = read_workbook(&path, &layout.data_sheet)?;
    normalize_workbook(&workbook, year, layout)
}

/// Concatenates files in request order.
///
/// Staff maps merge with later files winning; the first non-empty store list wins.
pub fn merge(files: Vec<ParsedFile>, default_order: &StoreOrder) -> Dataset {
    let staff_map: StaffMap = files
        .iter()
        .flat_map(|f| f.staff_map.iter().map(|(k, v)| (k.clone(), v.clone())))
        .collect();

    let store_order = files
        .iter()
        .find(|f| !f.store_order.is_empty())
        .map(|f| StoreOrder::new(f.store_order.clone()))
        .unwrap_or_else(|| default_order.clone());

    let loaded: Vec<LoadedFile> = files
        .iter()
        .map(|f| LoadedFile {
            file_name: f.file_name.clone(),
            year: f.year,
            row_count: f.records.len(),
        })
        .collect();

    let records = files.into_iter().flat_map(|f| f.records).collect();

    Dataset {
        records,
        files: loaded,
        store_order,
        staff_mapping_count: staff_map.len(),
        loaded_at: Some(Utc::now()),
    }
}

/// Sets the year of every record from the listed files, producing a new snapshot.
pub fn reassign_years(dataset: &Dataset, years: &[FileYear]) -> Dataset {
    let by_file: HashMap<&str, i32> = years
        .iter()
        .map(|fy| (fy.file_name.as_str(), fy.year))
        .collect();

    let records = dataset
        .records
        .iter()
        .cloned()
        .map(|mut record| {
            if let Some(&year) = by_file.get(record.source_file.as_str()) {
                record.year = FieldValue::from(year);
            }
            record
        })
        .collect();

    let files = dataset
        .files
        .iter()
        .cloned()
        .map(|mut file| {
            if let Some(&year) = by_file.get(file.file_name.as_str()) {
                file.year = Some(year);
            }
            file
        })
        .collect();

    tracing::info!("Reassigned years for {} file(s)", by_file.len());

    Dataset {
        records,
        files,
        store_order: dataset.store_order.clone(),
        staff_mapping_count: dataset.staff_mapping_count,
        loaded_at: Some(Utc::now()),
    }
}

/// Summary of a snapshot for the import endpoints.
pub fn describe(dataset: &Dataset, failed: Vec<FailedFile>) -> ImportResponse {
    ImportResponse {
        files: dataset.files.clone(),
        failed,
        record_count: dataset.records.len(),
        staff_mapping_count: dataset.staff_mapping_count,
        store_order: dataset.store_order.entries().to_vec(),
        loaded_at: dataset
            .loaded_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::default_config;
    use crate::shared::sales::{calculate_totals, filter_by_period};
    use contracts::usecases::u501_import_workbook::ImportFile;
    use std::path::Path;

    fn options() -> ImportOptions {
        ImportOptions::from_config(&default_config().unwrap())
    }

    fn write_csv(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_import_merges_files_in_request_order() {
        let dir = tempfile::tempdir().unwrap();
        let current = write_csv(
            dir.path(),
            "2024年度.csv",
            "店舗CD,スタッフ,月,総売上,指名数\n奈良,A,1,\"1,000\",2\n生駒,B,1,2000,4\n,,,,\n",
        );
        let previous = write_csv(
            dir.path(),
            "売上.csv",
            "店舗CD,スタッフ,月,総売上,指名数\n#N/A,C,1,500,1\n奈良,A,1,400,1\n",
        );

        let request = ImportRequest {
            files: vec![
                ImportFile { path: current, year: None },
                ImportFile { path: previous, year: Some(2023) },
            ],
        };
        let outcome = import_files(&request, &options()).await.unwrap();

        let dataset = &outcome.dataset;
        assert_eq!(dataset.records.len(), 4);
        assert_eq!(dataset.records[0].source_file, "2024年度.csv");
        assert_eq!(dataset.records[2].source_file, "売上.csv");
        assert_eq!(dataset.store_order, StoreOrder::default());

        let response = &outcome.response;
        assert_eq!(response.record_count, 4);
        assert_eq!(response.files[0].year, Some(2024));
        assert_eq!(response.files[1].year, Some(2023));
        assert_eq!(response.files[0].row_count, 2);
        assert!(response.failed.is_empty());
        assert!(!response.loaded_at.is_empty());

        let current_year = filter_by_period(&dataset.records, Some(2024), Some(1));
        assert_eq!(calculate_totals(&current_year).total_sales, 3000.0);
        let previous_year = filter_by_period(&dataset.records, Some(2023), None);
        assert_eq!(calculate_totals(&previous_year).total_sales, 400.0);
    }

    #[tokio::test]
    async fn test_failed_files_are_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(dir.path(), "2024.csv", "店舗,月,総売上\n奈良,1,100\n");
        let request = ImportRequest {
            files: vec![
                ImportFile {
                    path: dir.path().join("missing.csv").to_string_lossy().into_owned(),
                    year: None,
                },
                ImportFile { path: good, year: None },
                ImportFile {
                    path: "notes.txt".into(),
                    year: None,
                },
            ],
        };

        let outcome = import_files(&request, &options()).await.unwrap();
        assert_eq!(outcome.response.files.len(), 1);
        assert_eq!(outcome.response.failed.len(), 2);
        assert!(outcome.response.failed[0].path.ends_with("missing.csv"));
        assert_eq!(outcome.response.failed[1].path, "notes.txt");
    }

    #[tokio::test]
    async fn test_duplicate_file_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nara")).unwrap();
        std::fs::create_dir(dir.path().join("ikoma")).unwrap();
        let first =
            write_csv(&dir.path().join("nara"), "2024.csv", "店舗,月,総売上\n奈良,1,100\n");
        let second =
            write_csv(&dir.path().join("ikoma"), "2024.csv", "店舗,月,総売上\n生駒,1,200\n");

        let request = ImportRequest {
            files: vec![
                ImportFile { path: first, year: None },
                ImportFile { path: second.clone(), year: None },
            ],
        };
        let outcome = import_files(&request, &options()).await.unwrap();

        assert_eq!(outcome.dataset.records.len(), 1);
        assert_eq!(outcome.dataset.records[0].store_id.as_deref(), Some("奈良"));
        assert_eq!(outcome.response.failed.len(), 1);
        assert_eq!(outcome.response.failed[0].path, second);

        let updated = reassign_years(
            &outcome.dataset,
            &[FileYear {
                file_name: "2024.csv".into(),
                year: 2022,
            }],
        );
        assert_eq!(updated.records.len(), 1);
        assert_eq!(updated.files.len(), 1);
    }

    #[tokio::test]
    async fn test_import_fails_when_nothing_loads() {
        let request = ImportRequest {
            files: vec![ImportFile { path: "nothing.txt".into(), year: None }],
        };
        let result = import_files(&request, &options()).await;
        assert!(matches!(result, Err(ImportError::NothingImported { .. })));

        let empty = ImportRequest { files: Vec::new() };
        assert!(matches!(import_files(&empty, &options()).await, Err(ImportError::NoFiles)));
    }

    #[test]
    fn test_merge_staff_maps_and_store_order() {
        let first = ParsedFile {
            file_name: "a.xlsx".into(),
            staff_map: [("1".to_string(), "旧".to_string())].into_iter().collect(),
            ..ParsedFile::default()
        };
        let second = ParsedFile {
            file_name: "b.xlsx".into(),
            staff_map: [
                ("1".to_string(), "新".to_string()),
                ("2".to_string(), "B".to_string()),
            ]
            .into_iter()
            .collect(),
            store_order: vec!["villa".into(), "奈良".into()],
            ..ParsedFile::default()
        };
        let third = ParsedFile {
            file_name: "c.xlsx".into(),
            store_order: vec!["生駒".into()],
            ..ParsedFile::default()
        };

        let dataset = merge(vec![first, second, third], &StoreOrder::default());
        assert_eq!(dataset.staff_mapping_count, 2);
        assert_eq!(dataset.store_order.entries(), &["villa".to_string(), "奈良".to_string()]);
        assert_eq!(dataset.files.len(), 3);
    }

    #[test]
    fn test_reassign_years_by_source_file() {
        let dataset = Dataset {
            records: crate::shared::sales::fixtures::sample(),
            files: vec![LoadedFile {
                file_name: "test.xlsx".into(),
                year: Some(2024),
                row_count: 6,
            }],
            ..Dataset::default()
        };

        let updated = reassign_years(
            &dataset,
            &[FileYear {
                file_name: "test.xlsx".into(),
                year: 2021,
            }],
        );
        assert!(updated.records.iter().all(|r| r.year == FieldValue::Number(2021.0)));
        assert_eq!(updated.files[0].year, Some(2021));
        assert_eq!(dataset.records[0].year, FieldValue::Number(2024.0));

        let untouched = reassign_years(&dataset, &[]);
        assert_eq!(untouched.records, dataset.records);
    }
}
