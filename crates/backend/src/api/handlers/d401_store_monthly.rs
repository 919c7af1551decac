use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d401_store_monthly::{StoreMonthlyRequest, StoreMonthlyResponse};

use super::validate_month;
use crate::dashboards::d401_store_monthly::service;
use crate::shared::dataset::get_dataset;

/// GET /api/d401/store_monthly?year=2024&month=3
pub async fn get_store_monthly(
    Query(request): Query<StoreMonthlyRequest>,
) -> Result<Json<StoreMonthlyResponse>, StatusCode> {
    validate_month(request.month)?;

    let dataset = get_dataset();
    let response = service::get_store_monthly(&dataset, &request);

    tracing::info!(
        "D401 Dashboard: Returning {} stores for {:?}",
        response.stores.len(),
        response.year
    );
    Ok(Json(response))
}
