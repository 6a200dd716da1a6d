// src/eligibility/window.rs

use crate::models::eligibility::WindowState;
use chrono::{DateTime, Utc};

/// Places `now` relative to an exam's scheduled window.
///
/// An absent `start` means the exam has no schedule and is always
/// open; `end` is only meaningful when `start` is present. The end
/// boundary is inclusive: at exactly `end` the window is still open.
pub fn evaluate_window(
    now: DateTime<Utc>,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> WindowState {
    let Some(start) = start else {
        return WindowState::Open {
            remaining_until_close: None,
        };
    };

    if now < start {
        return WindowState::NotYetOpen {
            remaining: start - now,
        };
    }

    match end {
        Some(end) if now > end => WindowState::Closed,
        Some(end) => WindowState::Open {
            remaining_until_close: Some(end - now),
        },
        None => WindowState::Open {
            remaining_until_close: None,
        },
    }
}
