// src/service/rows.rs

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::error::AppError;
use crate::models::announcement::Announcement;
use crate::models::exam::{Exam, ExamStatus};
use crate::models::submission::{Submission, SubmissionAnswer, SubmissionStatus};

/// Raw exam row as returned by the hosted data service.
///
/// This is the single place raw service data is validated and turned
/// into typed entities; nothing downstream of the `TryFrom` impls ever
/// sees an unparsed timestamp or an ambiguous field shape.
#[derive(Debug, Deserialize, Validate)]
pub struct RawExamRow {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Joined subject: the service returns a bare string, an object
    /// with a `name` field, or a one-element array of such objects
    /// depending on the query shape.
    pub subject: Value,
    pub grade_level: i64,
    pub duration_minutes: i64,
    pub scheduled_start: Option<String>,
    pub scheduled_end: Option<String>,
    pub status: String,
    pub total_questions: i64,
    pub total_points: f64,
    pub passing_score: f64,
    pub allowed_attempts: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RawSubmissionRow {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub exam_id: String,
    #[validate(length(min = 1))]
    pub student_id: String,
    pub status: String,
    pub score_percent: Option<f64>,
    pub submitted_at: String,
}

#[derive(Debug, Deserialize)]
pub struct RawAnswerRow {
    pub question_index: i64,
    pub is_correct: bool,
    pub awarded_points: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RawAnnouncementRow {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub body: String,
    pub audience_grade: Option<i64>,
    pub published_at: String,
}

/// Parses an ISO-8601 timestamp from the service, failing fast on
/// malformed input instead of coercing it.
fn parse_instant(value: &str) -> Result<DateTime<Utc>, AppError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}

/// Resolves the service's three subject shapes to a plain name.
fn extract_subject_name(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(name) if !name.is_empty() => Ok(name.clone()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::BadData("Subject object has no name".to_string())),
        Value::Array(items) => match items.first() {
            Some(first) => extract_subject_name(first),
            None => Err(AppError::BadData("Subject array is empty".to_string())),
        },
        other => Err(AppError::BadData(format!(
            "Unsupported subject shape: {}",
            other
        ))),
    }
}

impl TryFrom<RawExamRow> for Exam {
    type Error = AppError;

    fn try_from(row: RawExamRow) -> Result<Self, Self::Error> {
        if let Err(validation_errors) = row.validate() {
            return Err(AppError::BadData(validation_errors.to_string()));
        }

        let subject_name = extract_subject_name(&row.subject)?;
        let scheduled_start = row.scheduled_start.as_deref().map(parse_instant).transpose()?;
        let scheduled_end = row.scheduled_end.as_deref().map(parse_instant).transpose()?;

        let status = match row.status.as_str() {
            "active" => ExamStatus::Active,
            "inactive" => ExamStatus::Inactive,
            other => {
                return Err(AppError::BadData(format!(
                    "Unknown exam status '{}' on exam {}",
                    other, row.id
                )));
            }
        };

        // Misconfigured exams must not break eligibility computation
        // downstream, so the minimum is enforced here.
        let allowed_attempts = if row.allowed_attempts < 1 {
            tracing::warn!(
                "Exam {} has allowed_attempts = {}, treating as 1",
                row.id,
                row.allowed_attempts
            );
            1
        } else {
            row.allowed_attempts
        };

        Ok(Exam {
            id: row.id,
            title: row.title,
            subject_name,
            grade_level: row.grade_level,
            duration_minutes: row.duration_minutes,
            scheduled_start,
            scheduled_end,
            status,
            total_questions: row.total_questions,
            total_points: row.total_points,
            passing_score: row.passing_score,
            allowed_attempts,
        })
    }
}

impl TryFrom<RawSubmissionRow> for Submission {
    type Error = AppError;

    fn try_from(row: RawSubmissionRow) -> Result<Self, Self::Error> {
        if let Err(validation_errors) = row.validate() {
            return Err(AppError::BadData(validation_errors.to_string()));
        }

        let status = match row.status.as_str() {
            "Pending" => SubmissionStatus::Pending,
            "Graded" => SubmissionStatus::Graded,
            "Reviewed" => SubmissionStatus::Reviewed,
            other => {
                return Err(AppError::BadData(format!(
                    "Unknown submission status '{}' on submission {}",
                    other, row.id
                )));
            }
        };

        Ok(Submission {
            submitted_at: parse_instant(&row.submitted_at)?,
            id: row.id,
            exam_id: row.exam_id,
            student_id: row.student_id,
            status,
            score_percent: row.score_percent,
        })
    }
}

impl From<RawAnswerRow> for SubmissionAnswer {
    fn from(row: RawAnswerRow) -> Self {
        SubmissionAnswer {
            question_index: row.question_index,
            is_correct: row.is_correct,
            awarded_points: row.awarded_points,
        }
    }
}

impl TryFrom<RawAnnouncementRow> for Announcement {
    type Error = AppError;

    fn try_from(row: RawAnnouncementRow) -> Result<Self, Self::Error> {
        if let Err(validation_errors) = row.validate() {
            return Err(AppError::BadData(validation_errors.to_string()));
        }

        Ok(Announcement {
            published_at: parse_instant(&row.published_at)?,
            id: row.id,
            title: row.title,
            body: row.body,
            audience_grade: row.audience_grade,
        })
    }
}
