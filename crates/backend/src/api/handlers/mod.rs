// Dashboard handlers (d400-d402)
pub mod d400_executive_summary;
pub mod d401_store_monthly;
pub mod d402_personal;
pub mod periods;

// Settings
pub mod settings;

// UseCase handlers
pub mod usecases;

use axum::http::StatusCode;

/// Rejects months outside 1..=12.
pub(crate) fn validate_month(month: Option<u32>) -> Result<(), StatusCode> {
    match month {
        Some(m) if !(1..=12).contains(&m) => {
            tracing::warn!("Rejected request with invalid month: {}", m);
            Err(StatusCode::BAD_REQUEST)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_month_bounds() {
        assert_eq!(validate_month(None), Ok(()));
        assert_eq!(validate_month(Some(1)), Ok(()));
        assert_eq!(validate_month(Some(12)), Ok(()));
        assert_eq!(validate_month(Some(0)), Err(StatusCode::BAD_REQUEST));
        assert_eq!(validate_month(Some(13)), Err(StatusCode::BAD_REQUEST));
    }
}
