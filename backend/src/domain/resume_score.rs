//! Resume review scores.
//!
//! Scores are append-only: each review inserts a fresh record and reads
//! resolve the latest one per student, so the history is never rewritten.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ResumeScoreId, StudentId};

/// One resume review for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeScore {
    /// Record identifier.
    pub id: ResumeScoreId,
    /// Reviewed student.
    pub student_id: StudentId,
    /// Applicant-tracking-system compatibility score, 0–100.
    pub ats_score: f64,
    /// Technical content score, 0–100.
    pub technical_score: f64,
    /// Communication score, 0–100.
    pub communication_score: f64,
    /// Experience score, 0–100.
    pub experience_score: f64,
    /// Skills coverage score, 0–100.
    pub skills_score: f64,
    /// Overall score, 0–100.
    pub overall_score: f64,
    /// Review feedback text.
    pub feedback: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Fields required to record a resume score.
#[derive(Debug, Clone, PartialEq)]
pub struct NewResumeScore {
    /// Reviewed student.
    pub student_id: StudentId,
    /// Applicant-tracking-system compatibility score, 0–100.
    pub ats_score: f64,
    /// Technical content score, 0–100.
    pub technical_score: f64,
    /// Communication score, 0–100.
    pub communication_score: f64,
    /// Experience score, 0–100.
    pub experience_score: f64,
    /// Skills coverage score, 0–100.
    pub skills_score: f64,
    /// Overall score, 0–100.
    pub overall_score: f64,
    /// Review feedback text.
    pub feedback: String,
}
