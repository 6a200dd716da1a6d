// src/models/exam.rs

use serde::{Deserialize, Serialize};

/// Lifecycle status of an exam, set by an admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    Active,
    Inactive,
}

/// An exam as authored by an admin collaborator.
///
/// Immutable from the student's perspective; every field has already
/// passed the normalization seam (`service::rows`), so timestamps are
/// real instants and `allowed_attempts` is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub subject_name: String,
    pub grade_level: i64,
    pub duration_minutes: i64,

    /// Absent means the exam is always available.
    pub scheduled_start: Option<chrono::DateTime<chrono::Utc>>,
    /// Meaningless when `scheduled_start` is absent.
    pub scheduled_end: Option<chrono::DateTime<chrono::Utc>>,

    pub status: ExamStatus,
    pub total_questions: i64,
    pub total_points: f64,
    /// Passing threshold in percent of `total_points`.
    pub passing_score: f64,
    pub allowed_attempts: i64,
}

impl Exam {
    pub fn is_active(&self) -> bool {
        self.status == ExamStatus::Active
    }
}
