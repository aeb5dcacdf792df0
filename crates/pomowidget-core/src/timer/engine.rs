//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It owns no threads or clocks:
//! the host calls `tick()` once per second while `is_running()` is true.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(Focusing) <-> Paused(Focusing)
//!              |  expiry
//!              v
//!         Running(OnBreak) <-> Paused(OnBreak)
//!
//! any --stop--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Durations::default());
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::SessionExpired) on transition
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::durations::Durations;
use super::session::{ProgressMode, Session, SessionLabel};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Core timer engine.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    durations: Durations,
    session: Option<Session>,
    running: bool,
    progress_mode: ProgressMode,
}

impl TimerEngine {
    /// Create an idle engine. No session exists until `start()`.
    pub fn new(durations: Durations) -> Self {
        Self {
            durations,
            session: None,
            running: false,
            progress_mode: ProgressMode::default(),
        }
    }

    pub fn with_progress_mode(mut self, mode: ProgressMode) -> Self {
        self.progress_mode = mode;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        match (&self.session, self.running) {
            (None, _) => TimerState::Idle,
            (Some(_), true) => TimerState::Running,
            (Some(_), false) => TimerState::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn durations(&self) -> Durations {
        self.durations
    }

    pub fn progress_mode(&self) -> ProgressMode {
        self.progress_mode
    }

    /// Configured length in seconds of an interval with this label.
    pub fn total_secs(&self, label: SessionLabel) -> u64 {
        u64::from(self.minutes_for(label)).saturating_mul(60)
    }

    pub fn minutes_for(&self, label: SessionLabel) -> u32 {
        match label {
            SessionLabel::Focusing => self.durations.focus(),
            SessionLabel::OnBreak => self.durations.break_(),
        }
    }

    /// Durations may only change while no session exists.
    pub fn can_adjust(&self) -> bool {
        self.session.is_none()
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            label: self.session.as_ref().map(|s| s.label),
            time_remaining: self.session.as_ref().map(|s| s.time_remaining),
            progress: self.session.as_ref().map(|s| s.progress),
            durations: self.durations,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a focus session, or resume the paused one.
    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None;
        }
        self.running = true;
        match &self.session {
            Some(session) => {
                tracing::debug!(label = %session.label, "timer resumed");
                Some(Event::TimerResumed {
                    time_remaining: session.time_remaining,
                    at: Utc::now(),
                })
            }
            None => {
                let session = Session::new(SessionLabel::Focusing, self.durations.focus());
                let duration_secs = session.time_remaining;
                tracing::debug!(duration_secs, "focus session started");
                self.session = Some(session);
                Some(Event::TimerStarted {
                    label: SessionLabel::Focusing,
                    duration_secs,
                    at: Utc::now(),
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.running = false;
        let session = self.session.as_ref()?;
        tracing::debug!(label = %session.label, "timer paused");
        Some(Event::TimerPaused {
            time_remaining: session.time_remaining,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.session.is_none() {
            return None;
        }
        self.start()
    }

    /// Single-button toggle: start/resume when stopped, pause when running.
    pub fn play_pause(&mut self) -> Option<Event> {
        if self.running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn stop(&mut self) -> Option<Event> {
        let had_session = self.session.take().is_some();
        self.running = false;
        if !had_session {
            return None;
        }
        tracing::debug!("timer stopped");
        Some(Event::TimerStopped { at: Utc::now() })
    }

    /// Call once per second while running.
    ///
    /// A session sitting at zero is replaced by the next one on the following
    /// tick, so the zero reading stays visible for one second.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        let (label, expired) = self.session.as_ref().map(|s| (s.label, s.is_expired()))?;
        if expired {
            return Some(self.expire());
        }
        let mode = self.progress_mode;
        let total_secs = self.total_secs(label);
        if let Some(session) = self.session.as_mut() {
            session.advance(mode, total_secs);
        }
        None
    }

    // ── Duration adjusters ───────────────────────────────────────────

    pub fn increase_focus(&mut self) -> Option<Event> {
        self.adjust(Durations::increase_focus)
    }

    pub fn decrease_focus(&mut self) -> Option<Event> {
        self.adjust(Durations::decrease_focus)
    }

    pub fn increase_break(&mut self) -> Option<Event> {
        self.adjust(Durations::increase_break)
    }

    pub fn decrease_break(&mut self) -> Option<Event> {
        self.adjust(Durations::decrease_break)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn adjust(&mut self, op: fn(&mut Durations) -> bool) -> Option<Event> {
        if !self.can_adjust() {
            tracing::trace!("duration change ignored while a session is active");
            return None;
        }
        if !op(&mut self.durations) {
            tracing::trace!(durations = ?self.durations, "duration change out of range");
            return None;
        }
        Some(Event::DurationsChanged {
            durations: self.durations,
            at: Utc::now(),
        })
    }

    fn expire(&mut self) -> Event {
        let from = self
            .session
            .as_ref()
            .map(|s| s.label)
            .unwrap_or(SessionLabel::Focusing);
        let to = from.next();
        let next = Session::new(to, self.minutes_for(to));
        let duration_secs = next.time_remaining;
        self.session = Some(next);
        tracing::info!(%from, %to, duration_secs, "session expired");
        Event::SessionExpired {
            from,
            to,
            duration_secs,
            at: Utc::now(),
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
