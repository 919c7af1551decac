use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/periods",
            get(handlers::periods::get_available_periods),
        )
        // D400 Executive Summary Dashboard
        .route(
            "/api/d400/executive_summary",
            get(handlers::d400_executive_summary::get_executive_summary),
        )
        // D401 Store Monthly Dashboard
        .route(
            "/api/d401/store_monthly",
            get(handlers::d401_store_monthly::get_store_monthly),
        )
        // D402 Personal Dashboard
        .route(
            "/api/d402/personal",
            get(handlers::d402_personal::get_personal),
        )
        .route(
            "/api/data_quality",
            get(handlers::periods::get_data_quality),
        )
        // ========================================
        // USECASES
        // ========================================
        // UseCase u501: Import sales workbooks
        .route("/api/u501/import", post(handlers::usecases::u501_import))
        .route(
            "/api/u501/reassign_years",
            post(handlers::usecases::u501_reassign_years),
        )
        // ========================================
        // SETTINGS
        // ========================================
        .route(
            "/api/settings/targets",
            get(handlers::settings::get_targets).put(handlers::settings::put_targets),
        )
}
