//! ML prediction service
//!
//! The grade-prediction models run in a separate HTTP service. This module
//! holds the wire types, the error type and the `PredictionService` seam that
//! handlers call; `HttpPredictionService` is the real client.

mod client;
mod types;

pub use client::HttpPredictionService;
pub use types::{PredictRequest, PredictResponse};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum MlError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("ML service unreachable: {0}")]
    Unreachable(String),

    #[error("ML service timed out")]
    Timeout,

    #[error("ML service returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid response from ML service: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Grade prediction and risk level for one student
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, MlError>;

    /// What-if simulation; body and response are passed through untouched
    async fn simulate(&self, body: &Value) -> Result<Value, MlError>;

    /// Metrics of every trained model
    async fn model_metrics(&self) -> Result<Value, MlError>;

    /// PDF report for one student
    async fn student_report(&self, student_id: Uuid) -> Result<Vec<u8>, MlError>;
}
