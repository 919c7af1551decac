use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d402_personal::{PersonalRequest, PersonalResponse};

use super::validate_month;
use crate::dashboards::d402_personal::service;
use crate::shared::dataset::get_dataset;

/// GET /api/d402/personal?year=2024&metric=average_ticket&store=奈良&staff=S01
pub async fn get_personal(
    Query(request): Query<PersonalRequest>,
) -> Result<Json<PersonalResponse>, StatusCode> {
    validate_month(request.month)?;

    let dataset = get_dataset();
    let response = service::get_personal(&dataset, &request);

    tracing::info!(
        "D402 Dashboard: {} ranked staff by {:?} for {:?}",
        response.rankings.len(),
        response.metric,
        response.year
    );
    Ok(Json(response))
}
