//! Risk Module
//!
//! Deterministic academic risk scoring from grades and behavioral signals.
//! Runs locally, independent of the ML prediction service.
//!
//! ## Structure
//! - `types`: RiskLevel, StudentProfile, GradeRecord, RiskAssessment
//! - `rules`: Bands, thresholds and increments
//! - `scorer`: Scoring, classification and roster aggregation
//!
//! ## Usage
//! ```ignore
//! use crate::logic::risk::{assess, StudentProfile};
//!
//! let result = assess(&profile, &[88.0, 92.0, 75.0]);
//! println!("{} ({:.2})", result.risk_level, result.probability);
//! ```

pub mod types;
pub mod rules;
pub mod scorer;

pub use types::{
    Contribution,
    GradeRecord,
    RiskAssessment,
    RiskFactor,
    RiskLevel,
    ScoreBreakdown,
    StudentProfile,
};

pub use scorer::{assess, assess_roster, classify, probability, score};
