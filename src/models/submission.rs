// src/models/submission.rs

use serde::{Deserialize, Serialize};

/// Grading status of a submission.
///
/// `Pending` means grading is still in flight; `Graded` and `Reviewed`
/// are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionStatus {
    Pending,
    Graded,
    Reviewed,
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

/// One attempt by one student at one exam.
///
/// Created when the student completes the exam flow; mutated later by
/// grading, which happens outside this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub exam_id: String,
    pub student_id: String,
    pub status: SubmissionStatus,
    /// Present once grading has produced a score.
    pub score_percent: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Per-question grading record attached to a submission.
///
/// The results screen counts correct answers from these records
/// exactly, instead of approximating from the aggregate score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAnswer {
    pub question_index: i64,
    pub is_correct: bool,
    pub awarded_points: f64,
}
