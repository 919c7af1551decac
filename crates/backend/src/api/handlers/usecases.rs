use axum::{http::StatusCode, Json};
use contracts::usecases::u501_import_workbook::{
    ImportRequest, ImportResponse, YearReassignmentRequest,
};
use once_cell::sync::OnceCell;

use crate::shared::dataset::{replace_dataset, update_dataset};
use crate::usecases::u501_import_workbook::{
    describe, import_files, reassign_years, ImportError, ImportOptions,
};

// ============================================================================
// UseCase u501: Import sales workbooks
// ============================================================================

static IMPORT_OPTIONS: OnceCell<ImportOptions> = OnceCell::new();

/// Sheet layout and fallback store order for HTTP-triggered imports.
pub fn set_import_options(options: ImportOptions) {
    if IMPORT_OPTIONS.set(options).is_err() {
        tracing::warn!("Import options already set, keeping the first ones");
    }
}

/// POST /api/u501/import
pub async fn u501_import(
    Json(request): Json<ImportRequest>,
) -> Result<Json<ImportResponse>, StatusCode> {
    let Some(options) = IMPORT_OPTIONS.get() else {
        tracing::error!("Import options have not been initialized");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    match import_files(&request, options).await {
        Ok(outcome) => {
            replace_dataset(outcome.dataset);
            Ok(Json(outcome.response))
        }
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            Err(match e {
                ImportError::NoFiles => StatusCode::BAD_REQUEST,
                ImportError::NothingImported { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            })
        }
    }
}

/// POST /api/u501/reassign_years
pub async fn u501_reassign_years(
    Json(request): Json<YearReassignmentRequest>,
) -> Result<Json<ImportResponse>, StatusCode> {
    if request.years.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let updated = update_dataset(|current| reassign_years(current, &request.years));
    Ok(Json(describe(&updated, Vec::new())))
}
