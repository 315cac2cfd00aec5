//! Grades handlers

use axum::{extract::{State, Path}, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::models::{Grade, CreateGrade, UpdateGrade};
use crate::extract::AppJson;
use crate::middleware::auth::Teacher;

/// List all grades
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Grade>>> {
    let grades = state.repo.list_grades().await?;
    Ok(Json(grades))
}

/// Get single grade
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Grade>> {
    let grade = state.repo.find_grade(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Grade not found".to_string()))?;

    Ok(Json(grade))
}

/// List grades of one student
pub async fn list_for_student(
    State(state): State<AppState>,
    Path(student_id): Path<Uuid>,
) -> AppResult<Json<Vec<Grade>>> {
    if state.repo.find_student(student_id).await?.is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let grades = state.repo.grades_for_student(student_id).await?;
    Ok(Json(grades))
}

/// Record a grade; the letter grade is derived from the score
pub async fn create(
    State(state): State<AppState>,
    Teacher(user): Teacher,
    AppJson(req): AppJson<CreateGrade>,
) -> AppResult<(StatusCode, Json<Grade>)> {
    req.validate()?;

    if state.repo.find_student(req.student_id).await?.is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    let grade = state.repo.create_grade(req).await?;
    tracing::debug!("Grade {} recorded for student {} by {}", grade.id, grade.student_id, user.email);

    Ok((StatusCode::CREATED, Json(grade)))
}

/// Partially update grade
pub async fn update(
    State(state): State<AppState>,
    Teacher(_): Teacher,
    Path(id): Path<i64>,
    AppJson(req): AppJson<UpdateGrade>,
) -> AppResult<Json<Grade>> {
    req.validate()?;

    if req.is_empty() {
        return Err(AppError::ValidationError("No fields to update".to_string()));
    }

    let grade = state.repo.update_grade(id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Grade not found".to_string()))?;

    Ok(Json(grade))
}

/// Delete grade
pub async fn delete(
    State(state): State<AppState>,
    Teacher(_): Teacher,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !state.repo.delete_grade(id).await? {
        return Err(AppError::NotFound("Grade not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
