//! Analytics handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppState, AppResult};
use crate::logic::analytics::{class_statistics, ClassStatistics};
use crate::middleware::auth::Teacher;

#[derive(Debug, Serialize)]
pub struct ClassAverageResponse {
    pub success: bool,
    pub statistics: ClassStatistics,
}

/// Class-wide grade statistics and ML risk distribution
pub async fn class_average(
    State(state): State<AppState>,
    Teacher(_): Teacher,
) -> AppResult<Json<ClassAverageResponse>> {
    let students = state.repo.list_students().await?;
    let grades = state.repo.list_grades().await?;
    let latest = state.repo.latest_predictions().await?;

    Ok(Json(ClassAverageResponse {
        success: true,
        statistics: class_statistics(&students, &grades, &latest),
    }))
}
