use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::timer::{Durations, SessionLabel, TimerState};

/// Every state change in the widget produces an Event.
/// Hosts render from them; the widget plays the audio cue on expiry.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        label: SessionLabel,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        time_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        time_remaining: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    /// The interval reached zero and the next one replaced it.
    SessionExpired {
        from: SessionLabel,
        to: SessionLabel,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    DurationsChanged {
        durations: Durations,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        label: Option<SessionLabel>,
        time_remaining: Option<u64>,
        progress: Option<f64>,
        durations: Durations,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn is_expiry(&self) -> bool {
        matches!(self, Event::SessionExpired { .. })
    }
}
