use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d400_executive_summary::{
    ExecutiveSummaryRequest, ExecutiveSummaryResponse,
};

use super::validate_month;
use crate::dashboards::d400_executive_summary::service;
use crate::shared::dataset::get_dataset;
use crate::shared::settings_store::current_targets;

/// GET /api/d400/executive_summary?year=2024&month=3
pub async fn get_executive_summary(
    Query(request): Query<ExecutiveSummaryRequest>,
) -> Result<Json<ExecutiveSummaryResponse>, StatusCode> {
    validate_month(request.month)?;
    tracing::info!(
        "D400 Dashboard: Getting executive summary for {:?}-{:?}",
        request.year,
        request.month
    );

    let dataset = get_dataset();
    let response = service::get_executive_summary(&dataset, &request, &current_targets());

    tracing::info!(
        "D400 Dashboard: Total sales {} for {:?}, {} excluded records",
        response.totals.total_sales,
        response.year,
        response.data_quality.excluded_count
    );
    Ok(Json(response))
}
