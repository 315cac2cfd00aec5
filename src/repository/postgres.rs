//! PostgreSQL repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::Repository;
use crate::AppResult;
use crate::models::{
    CreateGrade, CreateStudent, Grade, Prediction, SavePrediction, Student, UpdateGrade,
    UpdateStudent, User,
};

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(User::find_by_email(&self.pool, email).await?)
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        Ok(Student::list(&self.pool).await?)
    }

    async fn find_student(&self, id: Uuid) -> AppResult<Option<Student>> {
        Ok(Student::find_by_id(&self.pool, id).await?)
    }

    async fn student_email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool> {
        Ok(Student::email_taken(&self.pool, email, except).await?)
    }

    async fn create_student(&self, data: CreateStudent) -> AppResult<Student> {
        Ok(Student::create(&self.pool, data).await?)
    }

    async fn update_student(&self, id: Uuid, data: UpdateStudent) -> AppResult<Option<Student>> {
        Ok(Student::update(&self.pool, id, data).await?)
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<bool> {
        Ok(Student::delete(&self.pool, id).await?)
    }

    async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        Ok(Grade::list(&self.pool).await?)
    }

    async fn grades_for_student(&self, student_id: Uuid) -> AppResult<Vec<Grade>> {
        Ok(Grade::list_by_student(&self.pool, student_id).await?)
    }

    async fn find_grade(&self, id: i64) -> AppResult<Option<Grade>> {
        Ok(Grade::find_by_id(&self.pool, id).await?)
    }

    async fn create_grade(&self, data: CreateGrade) -> AppResult<Grade> {
        Ok(Grade::create(&self.pool, data).await?)
    }

    async fn update_grade(&self, id: i64, data: UpdateGrade) -> AppResult<Option<Grade>> {
        Ok(Grade::update(&self.pool, id, data).await?)
    }

    async fn delete_grade(&self, id: i64) -> AppResult<bool> {
        Ok(Grade::delete(&self.pool, id).await?)
    }

    async fn save_prediction(&self, data: SavePrediction) -> AppResult<Prediction> {
        Ok(Prediction::create(&self.pool, data).await?)
    }

    async fn predictions_for_student(&self, student_id: Uuid) -> AppResult<Vec<Prediction>> {
        Ok(Prediction::list_by_student(&self.pool, student_id).await?)
    }

    async fn latest_predictions(&self) -> AppResult<Vec<Prediction>> {
        Ok(Prediction::latest_per_student(&self.pool).await?)
    }
}
