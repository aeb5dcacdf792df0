use std::fmt;

use serde::{Deserialize, Serialize};

/// Progress added per tick while focusing, in percent.
pub const FOCUS_PROGRESS_PER_TICK: f64 = 0.067;
/// Progress added per tick while on break, in percent.
pub const BREAK_PROGRESS_PER_TICK: f64 = 0.32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionLabel {
    Focusing,
    OnBreak,
}

impl SessionLabel {
    /// The label that follows this one when the interval expires.
    pub fn next(self) -> Self {
        match self {
            SessionLabel::Focusing => SessionLabel::OnBreak,
            SessionLabel::OnBreak => SessionLabel::Focusing,
        }
    }

    pub fn progress_per_tick(self) -> f64 {
        match self {
            SessionLabel::Focusing => FOCUS_PROGRESS_PER_TICK,
            SessionLabel::OnBreak => BREAK_PROGRESS_PER_TICK,
        }
    }
}

impl fmt::Display for SessionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionLabel::Focusing => f.write_str("Focusing"),
            SessionLabel::OnBreak => f.write_str("On Break"),
        }
    }
}

/// How the progress percentage advances on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressMode {
    /// Fixed per-tick increments, distinct for focus and break.
    #[default]
    Heuristic,
    /// Elapsed seconds over the interval length.
    Proportional,
}

/// One focus or break interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub label: SessionLabel,
    /// Seconds left in the interval.
    pub time_remaining: u64,
    /// Percent of the interval elapsed, 0.0 ..= 100.0.
    pub progress: f64,
}

impl Session {
    /// A fresh interval of `minutes` length.
    pub fn new(label: SessionLabel, minutes: u32) -> Self {
        Self {
            label,
            time_remaining: u64::from(minutes).saturating_mul(60),
            progress: 0.0,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.time_remaining == 0
    }

    /// Advance by one second.
    ///
    /// `total_secs` is the full length of the interval and is only consulted
    /// in proportional mode.
    pub fn advance(&mut self, mode: ProgressMode, total_secs: u64) {
        self.time_remaining = self.time_remaining.saturating_sub(1);
        let progress = match mode {
            ProgressMode::Heuristic => self.progress + self.label.progress_per_tick(),
            ProgressMode::Proportional => {
                if total_secs == 0 {
                    100.0
                } else {
                    let elapsed = total_secs.saturating_sub(self.time_remaining);
                    elapsed as f64 / total_secs as f64 * 100.0
                }
            }
        };
        self.progress = progress.min(100.0);
    }
}
