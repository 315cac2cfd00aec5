//! Risk Scoring Rules & Thresholds
//!
//! Constants only. The scoring itself lives in `scorer.rs`.

// ============================================================================
// GRADE COMPONENT (primary signal)
// ============================================================================

/// Points added when a student has no grades yet
pub const NO_GRADES_POINTS: u32 = 20;

/// Grade bands as (minimum average, points), checked top-down
pub const GRADE_BANDS: [(f64, u32); 3] = [
    (80.0, 0),
    (70.0, 10),
    (60.0, 25),
];

/// Points added when the average falls below every band
pub const FAILING_AVERAGE_POINTS: u32 = 40;

// ============================================================================
// SECONDARY FACTORS (fixed increments)
// ============================================================================

/// Points added per triggered secondary factor
pub const SECONDARY_FACTOR_POINTS: u32 = 10;

/// Weekly study hours strictly below this are flagged
pub const MIN_STUDY_HOURS: f64 = 5.0;

/// Failure counts strictly above this are flagged
pub const MAX_FAILURES: i32 = 0;

/// Absence counts strictly above this are flagged
pub const MAX_ABSENCES: i32 = 10;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// At or above this score = High
pub const HIGH_RISK_MIN_SCORE: u32 = 40;

/// At or above this score (and below High) = Medium
pub const MEDIUM_RISK_MIN_SCORE: u32 = 20;

/// Divisor turning the integer score into a probability-like value
pub const PROBABILITY_SCALE: f64 = 100.0;
