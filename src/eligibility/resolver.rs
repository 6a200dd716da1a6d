// src/eligibility/resolver.rs

use chrono::{DateTime, Utc};

use crate::eligibility::attempts::account_attempts;
use crate::eligibility::window::evaluate_window;
use crate::models::eligibility::{DisplayState, EligibilityView, WindowState};
use crate::models::exam::Exam;
use crate::models::submission::Submission;
use crate::state::SessionContext;

/// Classifies one exam for one student at one instant.
///
/// Priority order, first match wins:
/// 1. graded with the attempt budget spent -> `Completed`
/// 2. window closed                        -> `Expired`
/// 3. window not yet open                  -> `Scheduled`
/// 4. open, retake left, exam active       -> `ActiveAvailable`
/// 5. otherwise                            -> `ActiveExhausted`
///
/// Completion dominates expiry: a graded, exhausted exam shows as
/// `Completed` even after its window closed. Deactivated exams never
/// classify as `ActiveAvailable`, so they are never takeable.
pub fn resolve_eligibility(
    exam: &Exam,
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> EligibilityView {
    let usage = account_attempts(exam.allowed_attempts, submissions);
    let window = evaluate_window(now, exam.scheduled_start, exam.scheduled_end);

    let display_state = if usage.has_graded && usage.remaining == 0 {
        DisplayState::Completed
    } else if window == WindowState::Closed {
        DisplayState::Expired
    } else if matches!(window, WindowState::NotYetOpen { .. }) {
        DisplayState::Scheduled
    } else if usage.can_retake && exam.is_active() {
        DisplayState::ActiveAvailable
    } else {
        DisplayState::ActiveExhausted
    };

    EligibilityView {
        exam: exam.clone(),
        attempts_used: usage.used,
        attempts_remaining: usage.remaining,
        window,
        display_state,
        is_takeable: display_state == DisplayState::ActiveAvailable,
    }
}

/// Visibility gate applied before an exam reaches the resolver:
/// students see active exams for their own grade level, admins see
/// everything.
pub fn is_visible_to(exam: &Exam, ctx: &SessionContext) -> bool {
    ctx.is_admin() || (exam.is_active() && exam.grade_level == ctx.grade_level)
}
