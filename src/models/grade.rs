//! Grade model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::logic::risk::GradeRecord;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Grade {
    pub id: i64,
    pub student_id: Uuid,
    pub subject: String,
    pub score: f64,
    /// Letter grade derived from `score`
    pub grade: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGrade {
    #[serde(alias = "studentId")]
    pub student_id: Uuid,
    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGrade {
    #[validate(length(min = 1, max = 100, message = "Subject must be 1-100 characters"))]
    pub subject: Option<String>,
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be between 0 and 100"))]
    pub score: Option<f64>,
}

impl UpdateGrade {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none() && self.score.is_none()
    }
}

/// Letter grade for a percentage score
pub fn letter_grade(score: f64) -> &'static str {
    if score >= 90.0 {
        "A"
    } else if score >= 80.0 {
        "B"
    } else if score >= 70.0 {
        "C"
    } else if score >= 60.0 {
        "D"
    } else {
        "F"
    }
}

impl Grade {
    pub fn record(&self) -> GradeRecord {
        GradeRecord {
            student_id: self.student_id,
            score: self.score,
        }
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Grade>("SELECT * FROM grades ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_student(pool: &PgPool, student_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Grade>("SELECT * FROM grades WHERE student_id = $1 ORDER BY id")
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Grade>("SELECT * FROM grades WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, data: CreateGrade) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Grade>(
            r#"
            INSERT INTO grades (student_id, subject, score, grade)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#
        )
        .bind(data.student_id)
        .bind(&data.subject)
        .bind(data.score)
        .bind(letter_grade(data.score))
        .fetch_one(pool)
        .await
    }

    pub async fn update(pool: &PgPool, id: i64, data: UpdateGrade) -> Result<Option<Self>, sqlx::Error> {
        let letter = data.score.map(letter_grade);

        sqlx::query_as::<_, Grade>(
            r#"
            UPDATE grades SET
                subject = COALESCE($2, subject),
                score = COALESCE($3, score),
                grade = COALESCE($4, grade)
            WHERE id = $1
            RETURNING *
            "#
        )
        .bind(id)
        .bind(&data.subject)
        .bind(data.score)
        .bind(letter)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
