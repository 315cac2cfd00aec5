//! ML model metrics handler

use axum::{extract::State, Json};
use serde_json::Value;

use crate::{AppState, AppResult};

/// Metrics of the trained models, straight from the ML service
pub async fn model_metrics(
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let metrics = state.ml.model_metrics().await?;
    Ok(Json(metrics))
}
