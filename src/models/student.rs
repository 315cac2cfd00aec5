//! Student model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::logic::risk::StudentProfile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub study_hours: f64,
    pub failures: i32,
    pub absences: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,
    #[validate(range(min = 0.0, max = 168.0, message = "Study hours must be between 0 and 168"))]
    pub study_hours: f64,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "Failures must be between 0 and 100"))]
    pub failures: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 365, message = "Absences must be between 0 and 365"))]
    pub absences: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: Option<i32>,
    #[validate(range(min = 0.0, max = 168.0, message = "Study hours must be between 0 and 168"))]
    pub study_hours: Option<f64>,
    #[validate(range(min = 0, max = 100, message = "Failures must be between 0 and 100"))]
    pub failures: Option<i32>,
    #[validate(range(min = 0, max = 365, message = "Absences must be between 0 and 365"))]
    pub absences: Option<i32>,
}

impl UpdateStudent {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.study_hours.is_none()
            && self.failures.is_none()
            && self.absences.is_none()
    }
}

impl Student {
    /// Behavioral signals fed to the risk scorer
    pub fn profile(&self) -> StudentProfile {
        StudentProfile {
            student_id: self.id,
            study_hours: self.study_hours,
            failures: self.failures,
            absences: self.absences,
        }
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Student>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `email` belongs to a student other than `except`
    pub async fn email_taken(pool: &PgPool, email: &str, except: Option<Uuid>) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1 AND ($2::uuid IS NULL OR id <> $2))"
        )
        .bind(email)
        .bind(except)
        .fetch_one(pool)
        .await
    }

    pub async fn create(pool: &PgPool, data: CreateStudent) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, name, email, age, study_hours, failures, absences)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#
        )
        .bind(Uuid::new_v4())
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.age)
        .bind(data.study_hours)
        .bind(data.failures)
        .bind(data.absences)
        .fetch_one(pool)
        .await
    }

    pub async fn update(pool: &PgPool, id: Uuid, data: UpdateStudent) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                age = COALESCE($4, age),
                study_hours = COALESCE($5, study_hours),
                failures = COALESCE($6, failures),
                absences = COALESCE($7, absences),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.age)
        .bind(data.study_hours)
        .bind(data.failures)
        .bind(data.absences)
        .fetch_optional(pool)
        .await
    }

    /// Grades and predictions go with the student (ON DELETE CASCADE)
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
