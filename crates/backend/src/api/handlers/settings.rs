use axum::{http::StatusCode, Json};
use contracts::shared::settings::TargetSettings;

use crate::shared::settings_store::{current_targets, get_settings, SettingsStore};

/// GET /api/settings/targets
pub async fn get_targets() -> Json<TargetSettings> {
    Json(current_targets())
}

/// PUT /api/settings/targets
pub async fn put_targets(
    Json(targets): Json<TargetSettings>,
) -> Result<Json<TargetSettings>, StatusCode> {
    if let Err(e) = SettingsStore::validate(&targets) {
        tracing::warn!("Rejected target settings: {}", e);
        return Err(StatusCode::BAD_REQUEST);
    }

    let Some(store) = get_settings() else {
        tracing::error!("Settings store has not been initialized");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    match store.update(targets) {
        Ok(saved) => Ok(Json(saved)),
        Err(e) => {
            tracing::error!("Failed to save target settings: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
