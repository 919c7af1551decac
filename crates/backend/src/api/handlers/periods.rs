use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::{AvailablePeriods, PeriodQuery};
use contracts::shared::data_quality::DataQualityReport;

use super::validate_month;
use crate::dashboards::periods;
use crate::shared::dataset::get_dataset;

/// GET /api/periods?year=2024
pub async fn get_available_periods(
    Query(query): Query<PeriodQuery>,
) -> Result<Json<AvailablePeriods>, StatusCode> {
    let dataset = get_dataset();
    let available = periods::get_available_periods(&dataset, query.year);
    tracing::info!(
        "Returning {} years and {} months",
        available.years.len(),
        available.months.len()
    );
    Ok(Json(available))
}

/// GET /api/data_quality?year=2024&month=3
pub async fn get_data_quality(
    Query(query): Query<PeriodQuery>,
) -> Result<Json<DataQualityReport>, StatusCode> {
    validate_month(query.month)?;

    let dataset = get_dataset();
    let report = periods::get_data_quality(&dataset, query);
    if !report.is_clean() {
        tracing::warn!(
            "Data quality: {} excluded, {} malformed of {} records",
            report.excluded_count,
            report.malformed_record_count,
            report.total_records
        );
    }
    Ok(Json(report))
}
