// src/handlers/results.rs

use serde::Serialize;

use crate::error::AppError;
use crate::models::exam::Exam;
use crate::models::submission::{Submission, SubmissionStatus};
use crate::service::client::DataService;

/// Result-screen summary for one submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub exam_id: String,
    pub submission_id: String,
    /// False while grading is still in flight; the score fields stay
    /// empty until then.
    pub graded: bool,
    pub score_percent: Option<f64>,
    /// Exact count from the per-question grading records, not an
    /// approximation derived from the aggregate score.
    pub correct_answers: Option<usize>,
    pub total_questions: i64,
    pub passed: Option<bool>,
}

/// Builds the result summary for a submission.
///
/// Pending submissions produce an ungraded summary without fetching
/// answer records; graded and reviewed ones count correct answers
/// exactly and compare the score against the exam's passing threshold.
pub async fn result_summary(
    svc: &dyn DataService,
    exam: &Exam,
    submission: &Submission,
) -> Result<ResultSummary, AppError> {
    if submission.status == SubmissionStatus::Pending {
        return Ok(ResultSummary {
            exam_id: exam.id.clone(),
            submission_id: submission.id.clone(),
            graded: false,
            score_percent: None,
            correct_answers: None,
            total_questions: exam.total_questions,
            passed: None,
        });
    }

    let answers = svc
        .fetch_submission_answers(&submission.id)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to fetch answers for submission {}: {:?}",
                submission.id,
                e
            );
            e
        })?;

    if answers.len() as i64 != exam.total_questions {
        tracing::warn!(
            "Submission {} has {} answer records for {} questions",
            submission.id,
            answers.len(),
            exam.total_questions
        );
    }

    let correct_answers = answers.iter().filter(|a| a.is_correct).count();
    let passed = submission.score_percent.map(|s| s >= exam.passing_score);

    Ok(ResultSummary {
        exam_id: exam.id.clone(),
        submission_id: submission.id.clone(),
        graded: true,
        score_percent: submission.score_percent,
        correct_answers: Some(correct_answers),
        total_questions: exam.total_questions,
        passed,
    })
}
