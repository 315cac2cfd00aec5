//! Shared harness for the API tests: an in-memory repository, a canned ML
//! service and helpers for building requests against the router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use uuid::Uuid;

use student_analysis::{
    create_router,
    handlers::auth::{generate_jwt, hash_password},
    ml::{MlError, PredictRequest, PredictResponse, PredictionService},
    models::{
        letter_grade, CreateGrade, CreateStudent, Grade, Prediction, SavePrediction, Student,
        UpdateGrade, UpdateStudent, User,
    },
    repository::Repository,
    AppResult, AppState, Config,
};

pub const SECRET: &str = "integration-test-secret";
pub const PASSWORD: &str = "password123";
pub const TEACHER_EMAIL: &str = "teacher@school.vps";
pub const STUDENT_EMAIL: &str = "student@school.vps";

// ============================================================================
// IN-MEMORY REPOSITORY
// ============================================================================

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    students: Vec<Student>,
    grades: Vec<Grade>,
    predictions: Vec<Prediction>,
    next_grade_id: i64,
    next_prediction_id: i64,
}

/// Mirrors the Postgres behavior handlers rely on: ordering, letter grades
/// and cascading deletes.
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn add_user(&self, email: &str, role: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(PASSWORD).unwrap(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().users.push(user.clone());
        user
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let t = self.tables.lock().unwrap();
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_students(&self) -> AppResult<Vec<Student>> {
        let t = self.tables.lock().unwrap();
        let mut students = t.students.clone();
        students.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(students)
    }

    async fn find_student(&self, id: Uuid) -> AppResult<Option<Student>> {
        let t = self.tables.lock().unwrap();
        Ok(t.students.iter().find(|s| s.id == id).cloned())
    }

    async fn student_email_taken(&self, email: &str, except: Option<Uuid>) -> AppResult<bool> {
        let t = self.tables.lock().unwrap();
        Ok(t.students.iter().any(|s| s.email == email && Some(s.id) != except))
    }

    async fn create_student(&self, data: CreateStudent) -> AppResult<Student> {
        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4(),
            name: data.name,
            email: data.email,
            age: data.age,
            study_hours: data.study_hours,
            failures: data.failures,
            absences: data.absences,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().students.push(student.clone());
        Ok(student)
    }

    async fn update_student(&self, id: Uuid, data: UpdateStudent) -> AppResult<Option<Student>> {
        let mut t = self.tables.lock().unwrap();
        let Some(s) = t.students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if let Some(v) = data.name { s.name = v; }
        if let Some(v) = data.email { s.email = v; }
        if let Some(v) = data.age { s.age = v; }
        if let Some(v) = data.study_hours { s.study_hours = v; }
        if let Some(v) = data.failures { s.failures = v; }
        if let Some(v) = data.absences { s.absences = v; }
        s.updated_at = Utc::now();
        Ok(Some(s.clone()))
    }

    async fn delete_student(&self, id: Uuid) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.students.len();
        t.students.retain(|s| s.id != id);
        t.grades.retain(|g| g.student_id != id);
        t.predictions.retain(|p| p.student_id != id);
        Ok(t.students.len() != before)
    }

    async fn list_grades(&self) -> AppResult<Vec<Grade>> {
        Ok(self.tables.lock().unwrap().grades.clone())
    }

    async fn grades_for_student(&self, student_id: Uuid) -> AppResult<Vec<Grade>> {
        let t = self.tables.lock().unwrap();
        Ok(t.grades.iter().filter(|g| g.student_id == student_id).cloned().collect())
    }

    async fn find_grade(&self, id: i64) -> AppResult<Option<Grade>> {
        let t = self.tables.lock().unwrap();
        Ok(t.grades.iter().find(|g| g.id == id).cloned())
    }

    async fn create_grade(&self, data: CreateGrade) -> AppResult<Grade> {
        let mut t = self.tables.lock().unwrap();
        t.next_grade_id += 1;
        let grade = Grade {
            id: t.next_grade_id,
            student_id: data.student_id,
            subject: data.subject,
            score: data.score,
            grade: letter_grade(data.score).to_string(),
            created_at: Utc::now(),
        };
        t.grades.push(grade.clone());
        Ok(grade)
    }

    async fn update_grade(&self, id: i64, data: UpdateGrade) -> AppResult<Option<Grade>> {
        let mut t = self.tables.lock().unwrap();
        let Some(g) = t.grades.iter_mut().find(|g| g.id == id) else {
            return Ok(None);
        };
        if let Some(subject) = data.subject {
            g.subject = subject;
        }
        if let Some(score) = data.score {
            g.score = score;
            g.grade = letter_grade(score).to_string();
        }
        Ok(Some(g.clone()))
    }

    async fn delete_grade(&self, id: i64) -> AppResult<bool> {
        let mut t = self.tables.lock().unwrap();
        let before = t.grades.len();
        t.grades.retain(|g| g.id != id);
        Ok(t.grades.len() != before)
    }

    async fn save_prediction(&self, data: SavePrediction) -> AppResult<Prediction> {
        let mut t = self.tables.lock().unwrap();
        t.next_prediction_id += 1;
        let prediction = Prediction {
            id: t.next_prediction_id,
            student_id: data.student_id,
            predicted_grade: data.predicted_grade,
            risk_level: data.risk_level,
            confidence: data.confidence,
            created_at: Utc::now(),
        };
        t.predictions.push(prediction.clone());
        Ok(prediction)
    }

    async fn predictions_for_student(&self, student_id: Uuid) -> AppResult<Vec<Prediction>> {
        let t = self.tables.lock().unwrap();
        let mut found: Vec<_> = t.predictions.iter()
            .filter(|p| p.student_id == student_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn latest_predictions(&self) -> AppResult<Vec<Prediction>> {
        let students: Vec<Uuid> = {
            let t = self.tables.lock().unwrap();
            t.students.iter().map(|s| s.id).collect()
        };
        let mut latest = Vec::new();
        for id in students {
            if let Some(p) = self.predictions_for_student(id).await?.into_iter().next() {
                latest.push(p);
            }
        }
        Ok(latest)
    }
}

// ============================================================================
// STUB ML SERVICE
// ============================================================================

/// Answers every call with canned data, or fails every call when `down`
#[derive(Default)]
pub struct StubPredictionService {
    pub down: bool,
}

#[async_trait]
impl PredictionService for StubPredictionService {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, MlError> {
        if self.down {
            return Err(MlError::Unreachable("connection refused".to_string()));
        }
        Ok(PredictResponse {
            predicted_grade: request.max_marks * 0.5,
            risk_level: "Medium".to_string(),
            explanation: Some(json!({"summary": "Medium Risk"})),
            model_used: request.model.clone(),
        })
    }

    async fn simulate(&self, body: &Value) -> Result<Value, MlError> {
        if self.down {
            return Err(MlError::Timeout);
        }
        Ok(json!({"success": true, "input": body}))
    }

    async fn model_metrics(&self) -> Result<Value, MlError> {
        if self.down {
            return Err(MlError::Rejected { status: 503, message: "models not loaded".to_string() });
        }
        Ok(json!({"random_forest": {"r2": 0.91}}))
    }

    async fn student_report(&self, _student_id: Uuid) -> Result<Vec<u8>, MlError> {
        if self.down {
            return Err(MlError::Unreachable("connection refused".to_string()));
        }
        Ok(b"%PDF-1.4 stub".to_vec())
    }
}

// ============================================================================
// TEST APP
// ============================================================================

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        port: 0,
        jwt_secret: SECRET.to_string(),
        jwt_expiration_hours: 1,
        ml_service_url: "http://ml.invalid".to_string(),
        ml_timeout_secs: 1,
        environment: "test".to_string(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MemoryRepository>,
    pub teacher_token: String,
    pub student_token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_ml(StubPredictionService::default())
    }

    pub fn with_ml(ml: StubPredictionService) -> Self {
        let repo = Arc::new(MemoryRepository::default());
        let teacher = repo.add_user(TEACHER_EMAIL, "teacher");
        let student = repo.add_user(STUDENT_EMAIL, "student");

        let state = AppState {
            repo: repo.clone(),
            ml: Arc::new(ml),
            config: test_config(),
        };

        Self {
            router: create_router(state),
            repo,
            teacher_token: generate_jwt(&teacher, SECRET, 1).unwrap(),
            student_token: generate_jwt(&student, SECRET, 1).unwrap(),
        }
    }

    /// Send a request and return the status with the JSON body (Null if empty)
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(method, uri, token, body).await;
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    pub fn teacher(&self) -> Option<&str> {
        Some(&self.teacher_token)
    }

    pub fn student(&self) -> Option<&str> {
        Some(&self.student_token)
    }

    /// Create a student through the API, returning its id
    pub async fn create_student(
        &self,
        name: &str,
        study_hours: f64,
        failures: i32,
        absences: i32,
    ) -> String {
        let (status, body) = self.send(
            Method::POST,
            "/api/students",
            self.teacher(),
            Some(json!({
                "name": name,
                "email": format!("{}@school.vps", name.to_lowercase()),
                "age": 16,
                "study_hours": study_hours,
                "failures": failures,
                "absences": absences,
            })),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_grade(&self, student_id: &str, subject: &str, score: f64) -> Value {
        let (status, body) = self.send(
            Method::POST,
            "/api/grades",
            self.teacher(),
            Some(json!({"student_id": student_id, "subject": subject, "score": score})),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body
    }
}
