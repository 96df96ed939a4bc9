//! Axum route handler for the in-process LLM Gateway.

use axum::{extract::State, Json};
use tracing::warn;

use crate::errors::AppError;
use crate::gateway::{AugmentRequest, Augmentation, Augmenter};
use crate::state::AppState;

/// POST /api/v1/augment
pub async fn handle_augment(
    State(state): State<AppState>,
    Json(req): Json<AugmentRequest>,
) -> Result<Json<Augmentation>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("query must not be empty".to_string()));
    }

    let augmentation = state.direct.augment(&req).await.map_err(|e| {
        warn!("Augment request failed: {e}");
        AppError::from(e)
    })?;
    Ok(Json(augmentation))
}
