// src/handlers/exams.rs

use chrono::{DateTime, Utc};

use crate::eligibility::resolver::{is_visible_to, resolve_eligibility};
use crate::error::AppError;
use crate::models::eligibility::EligibilityView;
use crate::service::client::DataService;
use crate::state::SessionContext;

/// Builds the home-screen exam list for the current session.
///
/// Fetches the exams for the session's grade, gates visibility,
/// fetches each exam's submissions and resolves eligibility. Scheduled
/// exams come first ordered by start time; unscheduled ones follow,
/// ordered by title.
pub async fn list_exam_cards(
    svc: &dyn DataService,
    ctx: &SessionContext,
    now: DateTime<Utc>,
) -> Result<Vec<EligibilityView>, AppError> {
    let exams = svc.fetch_exams(ctx.grade_level).await.map_err(|e| {
        tracing::error!("Failed to fetch exams: {:?}", e);
        e
    })?;

    let mut cards = Vec::new();
    for exam in exams {
        if !is_visible_to(&exam, ctx) {
            continue;
        }

        let submissions = svc
            .fetch_submissions(&ctx.student_id, &exam.id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch submissions for exam {}: {:?}", exam.id, e);
                e
            })?;

        cards.push(resolve_eligibility(&exam, &submissions, now));
    }

    cards.sort_by(|a, b| {
        let key = |v: &EligibilityView| {
            (
                v.exam.scheduled_start.is_none(),
                v.exam.scheduled_start,
                v.exam.title.clone(),
            )
        };
        key(a).cmp(&key(b))
    });

    Ok(cards)
}

/// Single-exam view for the detail screen.
///
/// An exam outside the session's visibility reports `NotFound` rather
/// than leaking its existence.
pub async fn exam_card(
    svc: &dyn DataService,
    ctx: &SessionContext,
    exam_id: &str,
    now: DateTime<Utc>,
) -> Result<EligibilityView, AppError> {
    let exam = svc.fetch_exam(exam_id).await?;

    if !is_visible_to(&exam, ctx) {
        return Err(AppError::NotFound(format!("Exam {} not found", exam_id)));
    }

    let submissions = svc.fetch_submissions(&ctx.student_id, &exam.id).await?;

    Ok(resolve_eligibility(&exam, &submissions, now))
}
