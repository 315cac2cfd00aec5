//! Predictions handlers
//!
//! ML-backed predictions go through `state.ml`; the risk endpoints use the
//! local scorer and never touch the ML service.

use axum::{extract::{State, Path}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::extract::AppJson;
use crate::{AppState, AppResult, AppError};
use crate::logic::risk::{self, RiskAssessment, RiskLevel};
use crate::ml::{PredictRequest, PredictResponse};
use crate::models::{Grade, Prediction, SavePrediction, Student};
use crate::middleware::auth::Teacher;

#[derive(Debug, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "studentData")]
    pub student_data: Option<Value>,
    pub max_marks: Option<f64>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub prediction: PredictResponse,
}

/// Ask the ML service for a grade prediction
pub async fn predict(
    State(state): State<AppState>,
    AppJson(req): AppJson<PredictionRequest>,
) -> AppResult<Json<PredictionResponse>> {
    let (student_data, max_marks) = match (req.student_data, req.max_marks) {
        (Some(data @ Value::Object(_)), Some(max_marks)) => (data, max_marks),
        _ => return Err(AppError::ValidationError("Missing studentData or max_marks".to_string())),
    };

    if max_marks <= 0.0 {
        return Err(AppError::ValidationError("max_marks must be positive".to_string()));
    }

    let prediction = state.ml
        .predict(&PredictRequest {
            student_data,
            max_marks,
            model: req.model,
        })
        .await?;

    Ok(Json(PredictionResponse {
        success: true,
        prediction,
    }))
}

/// What-if simulation, passed through to the ML service
pub async fn simulate(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> AppResult<Json<Value>> {
    let result = state.ml.simulate(&body).await?;
    Ok(Json(result))
}

/// Store an ML prediction
pub async fn save(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<SavePrediction>,
) -> AppResult<(StatusCode, Json<Prediction>)> {
    req.validate()?;

    let level: RiskLevel = req.risk_level.parse().map_err(AppError::ValidationError)?;
    req.risk_level = level.as_str().to_string();

    if state.repo.find_student(req.student_id).await?.is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let prediction = state.repo.save_prediction(req).await?;
    tracing::info!(
        "Prediction {} saved for student {} ({})",
        prediction.id, prediction.student_id, prediction.risk_level
    );

    Ok((StatusCode::CREATED, Json(prediction)))
}

/// Most recent stored prediction of a student
pub async fn latest(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> AppResult<Json<Prediction>> {
    state.repo.predictions_for_student(student_id)
        .await?
        .into_iter()
        .next()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No predictions found for this student".to_string()))
}

/// Stored prediction history of a student, newest first
pub async fn history(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> AppResult<Json<Vec<Prediction>>> {
    if state.repo.find_student(student_id).await?.is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let predictions = state.repo.predictions_for_student(student_id).await?;
    if predictions.is_empty() {
        return Err(AppError::NotFound("No predictions found for this student".to_string()));
    }

    Ok(Json(predictions))
}

/// Risk assessment of every student, computed fresh
pub async fn risk_roster(
    State(state): State<AppState>,
    Teacher(_): Teacher,
) -> AppResult<Json<Vec<RiskAssessment>>> {
    let students = state.repo.list_students().await?;
    let grades = state.repo.list_grades().await?;

    let profiles: Vec<_> = students.iter().map(Student::profile).collect();
    let records: Vec<_> = grades.iter().map(Grade::record).collect();

    let assessments = risk::assess_roster(&profiles, &records);
    tracing::debug!("Assessed risk for {} students", assessments.len());

    Ok(Json(assessments))
}

/// Risk assessment of one student
pub async fn risk_for_student(
    State(state): State<AppState>,
    Teacher(_): Teacher,
    Path(student_id): Path<Uuid>,
) -> AppResult<Json<RiskAssessment>> {
    let student = state.repo.find_student(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    let scores: Vec<f64> = state.repo.grades_for_student(student_id)
        .await?
        .iter()
        .map(|g| g.score)
        .collect();

    let profile = student.profile();
    let breakdown = risk::score(&profile, &scores);
    for c in &breakdown.contributions {
        tracing::debug!("Student {}: +{} {}", student_id, c.points, c.factor.describe());
    }

    Ok(Json(RiskAssessment::from_breakdown(student_id, &breakdown)))
}
