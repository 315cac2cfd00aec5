//! Risk Scorer
//!
//! Input: StudentProfile + grade scores
//! Output: ScoreBreakdown / RiskAssessment
//!
//! Pure and deterministic. Grades dominate; behavioral flags add fixed
//! increments so every point traces back to one named factor.

use std::collections::HashMap;

use uuid::Uuid;

use super::rules::{
    FAILING_AVERAGE_POINTS, GRADE_BANDS, HIGH_RISK_MIN_SCORE, MAX_ABSENCES, MAX_FAILURES,
    MEDIUM_RISK_MIN_SCORE, MIN_STUDY_HOURS, NO_GRADES_POINTS, PROBABILITY_SCALE,
    SECONDARY_FACTOR_POINTS,
};
use super::types::{
    Contribution, GradeRecord, RiskAssessment, RiskFactor, RiskLevel, ScoreBreakdown,
    StudentProfile,
};

// ============================================================================
// SCORING
// ============================================================================

/// Sum every risk contribution for one student
pub fn score(profile: &StudentProfile, grades: &[f64]) -> ScoreBreakdown {
    let mut contributions = Vec::new();

    let average_score = average(grades);

    let grade_points = match average_score {
        None => {
            contributions.push(Contribution { factor: RiskFactor::NoGrades, points: NO_GRADES_POINTS });
            NO_GRADES_POINTS
        }
        Some(avg) => {
            let points = grade_band_points(avg);
            if points > 0 {
                contributions.push(Contribution { factor: RiskFactor::GradeAverage, points });
            }
            points
        }
    };

    let secondary = [
        (profile.study_hours < MIN_STUDY_HOURS, RiskFactor::LowStudyHours),
        (profile.failures > MAX_FAILURES, RiskFactor::PriorFailures),
        (profile.absences > MAX_ABSENCES, RiskFactor::HighAbsences),
    ];

    let mut risk_score = grade_points;
    for (triggered, factor) in secondary {
        if triggered {
            contributions.push(Contribution { factor, points: SECONDARY_FACTOR_POINTS });
            risk_score += SECONDARY_FACTOR_POINTS;
        }
    }

    ScoreBreakdown {
        average_score,
        contributions,
        risk_score,
    }
}

/// Map an integer risk score to a level
pub fn classify(risk_score: u32) -> RiskLevel {
    if risk_score >= HIGH_RISK_MIN_SCORE {
        RiskLevel::High
    } else if risk_score >= MEDIUM_RISK_MIN_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Probability-like value in [0, 1]
pub fn probability(risk_score: u32) -> f64 {
    (risk_score as f64 / PROBABILITY_SCALE).min(1.0)
}

/// Score and classify one student
pub fn assess(profile: &StudentProfile, grades: &[f64]) -> RiskAssessment {
    RiskAssessment::from_breakdown(profile.student_id, &score(profile, grades))
}

impl RiskAssessment {
    /// Classify an already computed breakdown
    pub fn from_breakdown(student_id: Uuid, breakdown: &ScoreBreakdown) -> Self {
        Self {
            student_id,
            risk_level: classify(breakdown.risk_score),
            probability: probability(breakdown.risk_score),
        }
    }
}

/// Assess a whole roster: one result per student, in roster order.
///
/// Grades belonging to students outside the roster are ignored.
pub fn assess_roster(students: &[StudentProfile], grades: &[GradeRecord]) -> Vec<RiskAssessment> {
    let mut by_student: HashMap<Uuid, Vec<f64>> = HashMap::with_capacity(students.len());
    for grade in grades {
        by_student.entry(grade.student_id).or_default().push(grade.score);
    }

    students
        .iter()
        .map(|profile| {
            let scores = by_student
                .get(&profile.student_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            assess(profile, scores)
        })
        .collect()
}

fn average(grades: &[f64]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    Some(grades.iter().sum::<f64>() / grades.len() as f64)
}

fn grade_band_points(average: f64) -> u32 {
    GRADE_BANDS
        .iter()
        .find(|(min, _)| average >= *min)
        .map(|(_, points)| *points)
        .unwrap_or(FAILING_AVERAGE_POINTS)
}

// ============================================================================
// TESTS
// ============================================================================
