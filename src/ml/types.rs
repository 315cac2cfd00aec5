//! ML service wire types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of `POST /predict` and `POST /predict-with-model`
#[derive(Debug, Clone, Serialize)]
pub struct PredictRequest {
    pub student_data: Value,
    pub max_marks: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Sent as a formatted string ("85.00") by the service
    #[serde(deserialize_with = "number_or_string")]
    pub predicted_grade: f64,
    pub risk_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
}

/// Error body; older endpoints use `message`, newer ones `error`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceError {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ServiceError {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicted_grade_from_string() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "success": true,
            "predicted_grade": "72.50",
            "risk_level": "Medium"
        })).unwrap();
        assert_eq!(resp.predicted_grade, 72.5);
        assert!(resp.explanation.is_none());
    }

    #[test]
    fn test_predicted_grade_from_number() {
        let resp: PredictResponse = serde_json::from_value(json!({
            "predicted_grade": 64,
            "risk_level": "High",
            "explanation": {"summary": "High Risk"}
        })).unwrap();
        assert_eq!(resp.predicted_grade, 64.0);
        assert!(resp.explanation.is_some());
    }

    #[test]
    fn test_garbage_grade_rejected() {
        let result = serde_json::from_value::<PredictResponse>(json!({
            "predicted_grade": "n/a",
            "risk_level": "Low"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_model_omitted_when_absent() {
        let req = PredictRequest {
            student_data: json!({"age": 16}),
            max_marks: 100.0,
            model: None,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert!(body.get("model").is_none());
        assert_eq!(body["max_marks"], 100.0);
    }

    #[test]
    fn test_service_error_prefers_error_field() {
        let err: ServiceError = serde_json::from_value(json!({
            "message": "old", "error": "new"
        })).unwrap();
        assert_eq!(err.into_message().as_deref(), Some("new"));
    }
}
