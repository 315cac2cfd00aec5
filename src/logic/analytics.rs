//! Class statistics
//!
//! Overall and per-subject grade statistics plus the distribution of the
//! latest stored ML risk level per student.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Grade, Prediction, Student};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassStatistics {
    pub overall: OverallStats,
    pub by_subject: Vec<SubjectStats>,
    pub risk_distribution: Vec<RiskCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_students: usize,
    pub class_average: f64,
    pub total_grades: usize,
    pub at_risk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectStats {
    pub subject: String,
    pub average_score: f64,
    pub student_count: usize,
    pub highest_score: f64,
    pub lowest_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskCount {
    pub risk_level: String,
    pub count: usize,
}

/// `latest` must hold at most one prediction per student
pub fn class_statistics(students: &[Student], grades: &[Grade], latest: &[Prediction]) -> ClassStatistics {
    let class_average = if grades.is_empty() {
        0.0
    } else {
        round2(grades.iter().map(|g| g.score).sum::<f64>() / grades.len() as f64)
    };

    let at_risk_count = latest
        .iter()
        .filter(|p| p.level().is_some_and(|level| level.is_at_risk()))
        .count();

    ClassStatistics {
        overall: OverallStats {
            total_students: students.len(),
            class_average,
            total_grades: grades.len(),
            at_risk_count,
        },
        by_subject: subject_stats(grades),
        risk_distribution: risk_distribution(latest),
    }
}

fn subject_stats(grades: &[Grade]) -> Vec<SubjectStats> {
    let mut by_subject: BTreeMap<&str, Vec<&Grade>> = BTreeMap::new();
    for grade in grades {
        by_subject.entry(grade.subject.as_str()).or_default().push(grade);
    }

    by_subject
        .into_iter()
        .map(|(subject, rows)| {
            let scores = rows.iter().map(|g| g.score);
            let students: HashSet<Uuid> = rows.iter().map(|g| g.student_id).collect();
            SubjectStats {
                subject: subject.to_string(),
                average_score: round2(scores.clone().sum::<f64>() / rows.len() as f64),
                student_count: students.len(),
                highest_score: scores.clone().fold(f64::MIN, f64::max),
                lowest_score: scores.fold(f64::MAX, f64::min),
            }
        })
        .collect()
}

fn risk_distribution(latest: &[Prediction]) -> Vec<RiskCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for prediction in latest {
        *counts.entry(prediction.risk_level.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(risk_level, count)| RiskCount {
            risk_level: risk_level.to_string(),
            count,
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
