//! Students handlers

use axum::{extract::{State, Path}, http::StatusCode, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, AppResult, AppError};
use crate::models::{Student, CreateStudent, UpdateStudent};
use crate::extract::AppJson;
use crate::middleware::auth::Teacher;

/// List all students
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Student>>> {
    let students = state.repo.list_students().await?;
    Ok(Json(students))
}

/// Get single student
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Student>> {
    let student = state.repo.find_student(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Create student
pub async fn create(
    State(state): State<AppState>,
    Teacher(user): Teacher,
    AppJson(req): AppJson<CreateStudent>,
) -> AppResult<(StatusCode, Json<Student>)> {
    req.validate()?;

    if state.repo.student_email_taken(&req.email, None).await? {
        return Err(AppError::AlreadyExists("Email already in use by another student".to_string()));
    }

    let student = state.repo.create_student(req).await?;
    tracing::info!("Student created: {} ({}) by {}", student.name, student.id, user.email);

    Ok((StatusCode::CREATED, Json(student)))
}

/// Partially update student
pub async fn update(
    State(state): State<AppState>,
    Teacher(_): Teacher,
    Path(id): Path<Uuid>,
    AppJson(req): AppJson<UpdateStudent>,
) -> AppResult<Json<Student>> {
    req.validate()?;

    if req.is_empty() {
        return Err(AppError::ValidationError("No fields to update".to_string()));
    }

    if state.repo.find_student(id).await?.is_none() {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    if let Some(email) = &req.email {
        if state.repo.student_email_taken(email, Some(id)).await? {
            return Err(AppError::AlreadyExists("Email already in use by another student".to_string()));
        }
    }

    let student = state.repo.update_student(id, req)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".to_string()))?;

    Ok(Json(student))
}

/// Delete student with their grades and predictions
pub async fn delete(
    State(state): State<AppState>,
    Teacher(user): Teacher,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    if !state.repo.delete_student(id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    tracing::info!("Student {} deleted by {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
