//! HTTP client for the ML prediction service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Response;
use serde_json::Value;
use uuid::Uuid;

use super::types::{PredictRequest, PredictResponse, ServiceError};
use super::{MlError, PredictionService};

pub struct HttpPredictionService {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpPredictionService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MlError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MlError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into `MlError::Rejected` carrying the service's message
    async fn ensure_success(response: Response) -> Result<Response, MlError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ServiceError>()
            .await
            .ok()
            .and_then(ServiceError::into_message)
            .unwrap_or_else(|| "Prediction service error".to_string());

        tracing::warn!("ML service rejected request ({}): {}", status, message);
        Err(MlError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

fn transport_error(err: reqwest::Error) -> MlError {
    if err.is_timeout() {
        MlError::Timeout
    } else {
        MlError::Unreachable(err.to_string())
    }
}

fn decode_error(err: reqwest::Error) -> MlError {
    MlError::InvalidResponse(err.to_string())
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, MlError> {
        let path = if request.model.is_some() { "/predict-with-model" } else { "/predict" };
        tracing::debug!("Requesting prediction from {}", path);

        let response = self.http_client
            .post(self.url(path))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        Self::ensure_success(response).await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn simulate(&self, body: &Value) -> Result<Value, MlError> {
        let response = self.http_client
            .post(self.url("/simulate"))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        Self::ensure_success(response).await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn model_metrics(&self) -> Result<Value, MlError> {
        let response = self.http_client
            .get(self.url("/model-metrics"))
            .send()
            .await
            .map_err(transport_error)?;

        Self::ensure_success(response).await?
            .json()
            .await
            .map_err(decode_error)
    }

    async fn student_report(&self, student_id: Uuid) -> Result<Vec<u8>, MlError> {
        let response = self.http_client
            .get(self.url(&format!("/generate-report/{}", student_id)))
            .send()
            .await
            .map_err(transport_error)?;

        let bytes = Self::ensure_success(response).await?
            .bytes()
            .await
            .map_err(decode_error)?;

        Ok(bytes.to_vec())
    }
}
