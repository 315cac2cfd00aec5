//! Data access
//!
//! Handlers only see the `Repository` trait. `PgRepository` is the production
//! implementation; tests inject their own.

mod postgres;

pub use postgres::PgRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::AppResult;
use crate::models::{
    CreateGrade, CreateStudent, Grade, Prediction, SavePrediction, Student, UpdateGrade,
    UpdateStudent, User,
};

#[async_trait]
pub trait Repository: Send + Sync {
    // Users
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    // Students
    async fn list_students(&self) -> AppResult<Vec<Student>>;
    async fn find_student(&self, id: Uuid) -> AppResult<Option<Student>>;
    async fn student_email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool>;
    async fn create_student(&self, data: CreateStudent) -> AppResult<Student>;
    async fn update_student(&self, id: Uuid, data: UpdateStudent) -> AppResult<Option<Student>>;
    /// Returns false when no such student existed
    async fn delete_student(&self, id: Uuid) -> AppResult<bool>;

    // Grades
    async fn list_grades(&self) -> AppResult<Vec<Grade>>;
    async fn grades_for_student(&self, student_id: Uuid) -> AppResult<Vec<Grade>>;
    async fn find_grade(&self, id: i64) -> AppResult<Option<Grade>>;
    async fn create_grade(&self, data: CreateGrade) -> AppResult<Grade>;
    async fn update_grade(&self, id: i64, data: UpdateGrade) -> AppResult<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> AppResult<bool>;

    // Predictions
    async fn save_prediction(&self, data: SavePrediction) -> AppResult<Prediction>;
    /// Newest first
    async fn predictions_for_student(&self, student_id: Uuid) -> AppResult<Vec<Prediction>>;
    async fn latest_predictions(&self) -> AppResult<Vec<Prediction>>;
}
