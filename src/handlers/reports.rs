//! Reports handlers

use axum::{
    extract::{State, Path},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{AppState, AppResult};

/// PDF report for one student, generated by the ML service
pub async fn student_report(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> AppResult<Response> {
    let pdf = state.ml.student_report(student_id).await?;
    let disposition = format!("attachment; filename=student_{}_report.pdf", student_id);

    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    ).into_response())
}
