//! Stored ML prediction model

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

use crate::logic::risk::RiskLevel;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Prediction {
    pub id: i64,
    pub student_id: Uuid,
    pub predicted_grade: f64,
    pub risk_level: String,
    pub confidence: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SavePrediction {
    #[serde(alias = "studentId")]
    pub student_id: Uuid,
    #[validate(range(min = 0.0, message = "Predicted grade cannot be negative"))]
    pub predicted_grade: f64,
    pub risk_level: String,
    #[validate(range(min = 0.0, max = 100.0, message = "Confidence must be between 0 and 100"))]
    pub confidence: Option<f64>,
}

impl Prediction {
    pub fn level(&self) -> Option<RiskLevel> {
        self.risk_level.parse().ok()
    }

    pub async fn create(pool: &PgPool, data: SavePrediction) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Prediction>(
            r#"
            INSERT INTO predictions (student_id, predicted_grade, risk_level, confidence)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#
        )
        .bind(data.student_id)
        .bind(data.predicted_grade)
        .bind(&data.risk_level)
        .bind(data.confidence)
        .fetch_one(pool)
        .await
    }

    /// Newest first
    pub async fn list_by_student(pool: &PgPool, student_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Prediction>(
            "SELECT * FROM predictions WHERE student_id = $1 ORDER BY created_at DESC, id DESC"
        )
        .bind(student_id)
        .fetch_all(pool)
        .await
    }

    /// Most recent prediction of every student that has one
    pub async fn latest_per_student(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Prediction>(
            r#"
            SELECT DISTINCT ON (student_id) *
            FROM predictions
            ORDER BY student_id, created_at DESC, id DESC
            "#
        )
        .fetch_all(pool)
        .await
    }
}
