// src/eligibility/attempts.rs

use crate::models::eligibility::AttemptUsage;
use crate::models::submission::Submission;

/// Computes the attempt budget for one student/exam pair.
///
/// Every submission consumes one attempt, including ones still pending
/// grading: a student must not be able to start a retake while the
/// previous attempt is in flight. Only a submission that finished
/// grading counts towards completion, which the resolver checks
/// separately.
///
/// `allowed_attempts` below 1 is a configuration error on the exam;
/// it is logged and treated as 1 so the computation never fails.
/// More submissions than allowed attempts is a data anomaly; it is
/// logged and `remaining` is clamped to 0.
pub fn account_attempts(allowed_attempts: i64, submissions: &[Submission]) -> AttemptUsage {
    let allowed = if allowed_attempts < 1 {
        tracing::warn!(
            "allowed_attempts = {} is below the minimum, treating as 1",
            allowed_attempts
        );
        1
    } else {
        allowed_attempts as u32
    };

    let used = submissions.len() as u32;

    if used > allowed {
        tracing::warn!(
            "{} submissions against {} allowed attempts, clamping remaining to 0",
            used,
            allowed
        );
    }

    let remaining = allowed.saturating_sub(used);

    AttemptUsage {
        used,
        remaining,
        can_retake: remaining > 0,
        has_graded: submissions.iter().any(|s| s.status.is_terminal()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::submission::SubmissionStatus;
    use chrono::Utc;

    fn submission(status: SubmissionStatus) -> Submission {
        Submission {
            id: "sub-1".to_string(),
            exam_id: "exam-1".to_string(),
            student_id: "student-1".to_string(),
            status,
            score_percent: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_submissions() {
        let usage = account_attempts(2, &[]);
        assert_eq!(usage.used, 0);
        assert_eq!(usage.remaining, 2);
        assert!(usage.can_retake);
        assert!(!usage.has_graded);
    }

    #[test]
    fn test_graded_submission_leaves_a_retake() {
        let usage = account_attempts(2, &[submission(SubmissionStatus::Graded)]);
        assert_eq!(usage.used, 1);
        assert_eq!(usage.remaining, 1);
        assert!(usage.can_retake);
        assert!(usage.has_graded);
    }

    #[test]
    fn test_pending_submission_consumes_budget() {
        // Grading in flight still blocks a second attempt.
        let usage = account_attempts(1, &[submission(SubmissionStatus::Pending)]);
        assert_eq!(usage.used, 1);
        assert_eq!(usage.remaining, 0);
        assert!(!usage.can_retake);
        assert!(!usage.has_graded);
    }

    #[test]
    fn test_reviewed_counts_as_graded() {
        // Reviewed is downstream of grading.
        let usage = account_attempts(1, &[submission(SubmissionStatus::Reviewed)]);
        assert!(!usage.can_retake);
        assert!(usage.has_graded);
    }

    #[test]
    fn test_remaining_identity() {
        // remaining = max(0, allowed - used) and canRetake <=> remaining > 0.
        for allowed in 1..5i64 {
            for used in 0..7usize {
                let subs: Vec<_> = (0..used)
                    .map(|_| submission(SubmissionStatus::Graded))
                    .collect();
                let usage = account_attempts(allowed, &subs);
                let expected = (allowed as i64 - used as i64).max(0) as u32;
                assert_eq!(usage.remaining, expected);
                assert_eq!(usage.can_retake, usage.remaining > 0);
            }
        }
    }

    #[test]
    fn test_zero_allowed_attempts_is_treated_as_one() {
        let usage = account_attempts(0, &[]);
        assert_eq!(usage.remaining, 1);
        assert!(usage.can_retake);
    }

    #[test]
    fn test_overflowing_submissions_clamp_to_zero() {
        let subs = vec![
            submission(SubmissionStatus::Graded),
            submission(SubmissionStatus::Graded),
            submission(SubmissionStatus::Graded),
        ];
        let usage = account_attempts(2, &subs);
        assert_eq!(usage.used, 3);
        assert_eq!(usage.remaining, 0);
        assert!(!usage.can_retake);
    }
}
