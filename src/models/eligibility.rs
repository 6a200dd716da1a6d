// src/models/eligibility.rs

use crate::models::exam::Exam;
use chrono::TimeDelta;

/// Where the current instant falls relative to an exam's scheduled
/// window. For a fixed exam this only ever moves forward:
/// `NotYetOpen` -> `Open` -> `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowState {
    NotYetOpen {
        /// Time until the window opens.
        remaining: TimeDelta,
    },
    Open {
        /// Time until the window closes; `None` for unbounded windows.
        remaining_until_close: Option<TimeDelta>,
    },
    Closed,
}

impl WindowState {
    pub fn is_open(&self) -> bool {
        matches!(self, WindowState::Open { .. })
    }
}

/// Classification of an exam for one student at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Window has not opened yet.
    Scheduled,
    /// Open and the student still has attempts left.
    ActiveAvailable,
    /// Open but no attempts left (or the exam was deactivated).
    ActiveExhausted,
    /// Graded with the attempt budget spent. Dominates `Expired`.
    Completed,
    /// Window closed without completion.
    Expired,
}

/// Attempt budget arithmetic for one student/exam pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptUsage {
    pub used: u32,
    pub remaining: u32,
    pub can_retake: bool,
    /// Whether any attempt has finished grading (`Graded` or
    /// `Reviewed`).
    pub has_graded: bool,
}

/// Derived, never persisted: recomputed on every fetch and every
/// countdown tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityView {
    pub exam: Exam,
    pub attempts_used: u32,
    pub attempts_remaining: u32,
    pub window: WindowState,
    pub display_state: DisplayState,
    pub is_takeable: bool,
}
