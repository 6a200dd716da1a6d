// src/countdown.rs

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::eligibility::window::evaluate_window;
use crate::models::eligibility::WindowState;

/// Which boundary a tick is counting down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    UntilStart,
    UntilClose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Emitted once per second while a boundary is approaching.
    Tick {
        phase: CountdownPhase,
        label: String,
    },
    /// Emitted exactly once when the window is observed closed, so the
    /// card can reclassify without a full refetch.
    Expired,
}

/// Renders a duration as a short human-readable countdown label.
///
/// A day or more shows days and hours; an hour or more shows hours,
/// minutes and seconds; a minute or more shows minutes and seconds;
/// anything below that shows bare seconds. Negative durations render
/// as "0s".
pub fn format_countdown(remaining: TimeDelta) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Per-card countdown driver.
///
/// Re-evaluates the exam window once a second and pushes events to the
/// owning card. Dropping the presenter aborts the tick task, which is
/// how an unmounting card cancels its timers.
pub struct CountdownPresenter {
    handle: tokio::task::JoinHandle<()>,
}

impl CountdownPresenter {
    pub fn spawn(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        events: mpsc::UnboundedSender<CountdownEvent>,
    ) -> Self {
        let handle = tokio::spawn(run_ticks(start, end, events, Utc::now));
        Self { handle }
    }
}

impl Drop for CountdownPresenter {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_ticks<F>(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    events: mpsc::UnboundedSender<CountdownEvent>,
    now_fn: F,
) where
    F: Fn() -> DateTime<Utc> + Send + 'static,
{
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let event = match evaluate_window(now_fn(), start, end) {
            WindowState::NotYetOpen { remaining } => CountdownEvent::Tick {
                phase: CountdownPhase::UntilStart,
                label: format_countdown(remaining),
            },
            WindowState::Open {
                remaining_until_close: Some(remaining),
            } => CountdownEvent::Tick {
                phase: CountdownPhase::UntilClose,
                label: format_countdown(remaining),
            },
            // Nothing left to count down towards.
            WindowState::Open {
                remaining_until_close: None,
            } => break,
            WindowState::Closed => {
                let _ = events.send(CountdownEvent::Expired);
                break;
            }
        };

        if events.send(event).is_err() {
            // Receiver dropped: the card unmounted.
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_day_and_hour() {
        // 1d 1h 1m 1s keeps only the two largest units.
        assert_eq!(format_countdown(TimeDelta::seconds(90_061)), "1d 1h");
    }

    #[test]
    fn test_format_hours_band() {
        assert_eq!(format_countdown(TimeDelta::seconds(3_845)), "1h 4m 5s");
    }

    #[test]
    fn test_format_minutes_band() {
        assert_eq!(format_countdown(TimeDelta::seconds(729)), "12m 9s");
    }

    #[test]
    fn test_format_bare_seconds() {
        assert_eq!(format_countdown(TimeDelta::seconds(59)), "59s");
    }

    #[test]
    fn test_format_negative_is_zero() {
        assert_eq!(format_countdown(TimeDelta::seconds(-5)), "0s");
    }

    /// Clock that follows tokio's (paused) test clock from a fixed
    /// chrono origin, so advancing virtual time advances "now".
    fn test_clock(origin: DateTime<Utc>) -> impl Fn() -> DateTime<Utc> + Send + 'static {
        let started = tokio::time::Instant::now();
        move || {
            let elapsed = tokio::time::Instant::now() - started;
            origin + TimeDelta::milliseconds(elapsed.as_millis() as i64)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_through_both_phases_then_expires() {
        let origin = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let start = Some(origin + TimeDelta::seconds(2));
        let end = Some(origin + TimeDelta::seconds(4));
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(run_ticks(start, end, tx, test_clock(origin)));

        let mut got = Vec::new();
        while let Some(event) = rx.recv().await {
            got.push(event);
        }

        let tick = |phase, label: &str| CountdownEvent::Tick {
            phase,
            label: label.to_string(),
        };
        assert_eq!(
            got,
            vec![
                tick(CountdownPhase::UntilStart, "2s"),
                tick(CountdownPhase::UntilStart, "1s"),
                tick(CountdownPhase::UntilClose, "2s"),
                tick(CountdownPhase::UntilClose, "1s"),
                tick(CountdownPhase::UntilClose, "0s"),
                CountdownEvent::Expired,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_open_window_stops_silently() {
        let origin = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let start = Some(origin - TimeDelta::seconds(10));
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(run_ticks(start, None, tx, test_clock(origin)));

        // Task ends without emitting anything: no boundary to count to.
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_closed_window_expires_once() {
        let origin = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let start = Some(origin - TimeDelta::seconds(20));
        let end = Some(origin - TimeDelta::seconds(10));
        let (tx, mut rx) = mpsc::unbounded_channel();

        tokio::spawn(run_ticks(start, end, tx, test_clock(origin)));

        assert_eq!(rx.recv().await, Some(CountdownEvent::Expired));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_presenter_cancels_ticks() {
        let origin = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Presenter counting down to a start far in the future.
        let presenter = CountdownPresenter {
            handle: tokio::spawn(run_ticks(
                Some(origin + TimeDelta::hours(1)),
                None,
                tx,
                test_clock(origin),
            )),
        };

        let first = rx.recv().await;
        assert!(matches!(first, Some(CountdownEvent::Tick { .. })));

        drop(presenter);

        // Sender side is gone once the task is aborted.
        while let Some(event) = rx.recv().await {
            assert!(matches!(event, CountdownEvent::Tick { .. }));
        }
    }
}
