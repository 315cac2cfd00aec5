//! Risk Types
//!
//! Inputs and outputs of the risk scorer. No logic beyond conversions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// RISK LEVEL
// ============================================================================

/// Academic risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Medium and High both count as "at risk" on the dashboard
    pub fn is_at_risk(&self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            other => Err(format!("Unknown risk level '{}'", other)),
        }
    }
}

// ============================================================================
// INPUTS
// ============================================================================

/// Behavioral signals of one student
///
/// Values are taken as-is. Range checks belong to the request boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    pub student_id: Uuid,
    /// Weekly study time in hours
    pub study_hours: f64,
    /// Past course failures
    pub failures: i32,
    pub absences: i32,
}

/// One grade of one student, already normalized to a percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeRecord {
    pub student_id: Uuid,
    pub score: f64,
}

// ============================================================================
// OUTPUTS
// ============================================================================

/// Named cause of a risk contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    NoGrades,
    GradeAverage,
    LowStudyHours,
    PriorFailures,
    HighAbsences,
}

impl RiskFactor {
    pub fn describe(&self) -> &'static str {
        match self {
            RiskFactor::NoGrades => "No grades recorded yet",
            RiskFactor::GradeAverage => "Grade average below 80",
            RiskFactor::LowStudyHours => "Fewer than 5 study hours per week",
            RiskFactor::PriorFailures => "Previous course failures",
            RiskFactor::HighAbsences => "More than 10 absences",
        }
    }
}

/// One non-zero addition to the risk score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    pub factor: RiskFactor,
    pub points: u32,
}

/// Everything the scorer summed, in the order it summed it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Mean grade, `None` when the student has no grades
    pub average_score: Option<f64>,
    pub contributions: Vec<Contribution>,
    pub risk_score: u32,
}

/// Per-student result exposed to API callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub student_id: Uuid,
    pub risk_level: RiskLevel,
    /// `min(risk_score / 100, 1.0)`; not a calibrated probability
    pub probability: f64,
}
