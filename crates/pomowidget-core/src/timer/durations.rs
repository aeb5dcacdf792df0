//! Bounded focus and break lengths.
//!
//! Adjustments that would leave the allowed range are silently ignored;
//! callers get `false` back and nothing changes.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const FOCUS_MIN: u32 = 5;
pub const FOCUS_MAX: u32 = 60;
pub const FOCUS_STEP: u32 = 5;
pub const BREAK_MIN: u32 = 1;
pub const BREAK_MAX: u32 = 15;
pub const BREAK_STEP: u32 = 1;

pub const DEFAULT_FOCUS: u32 = 25;
pub const DEFAULT_BREAK: u32 = 5;

/// Focus and break lengths in minutes.
///
/// Deserialization goes through [`Durations::new`], so decoded values obey the
/// same bounds as the adjusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDurations")]
pub struct Durations {
    focus: u32,
    #[serde(rename = "break")]
    break_: u32,
}

#[derive(Deserialize)]
struct RawDurations {
    focus: u32,
    #[serde(rename = "break")]
    break_: u32,
}

impl TryFrom<RawDurations> for Durations {
    type Error = ConfigError;

    fn try_from(raw: RawDurations) -> Result<Self, Self::Error> {
        Durations::new(raw.focus, raw.break_)
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: DEFAULT_FOCUS,
            break_: DEFAULT_BREAK,
        }
    }
}

impl Durations {
    /// Build from explicit values, rejecting anything an adjuster could not reach.
    pub fn new(focus: u32, break_: u32) -> Result<Self, ConfigError> {
        validate("focus", focus, FOCUS_MIN, FOCUS_MAX, FOCUS_STEP)?;
        validate("break", break_, BREAK_MIN, BREAK_MAX, BREAK_STEP)?;
        Ok(Self { focus, break_ })
    }

    pub fn focus(&self) -> u32 {
        self.focus
    }

    pub fn break_(&self) -> u32 {
        self.break_
    }

    pub fn increase_focus(&mut self) -> bool {
        step_up(&mut self.focus, FOCUS_MAX, FOCUS_STEP)
    }

    pub fn decrease_focus(&mut self) -> bool {
        step_down(&mut self.focus, FOCUS_MIN, FOCUS_STEP)
    }

    pub fn increase_break(&mut self) -> bool {
        step_up(&mut self.break_, BREAK_MAX, BREAK_STEP)
    }

    pub fn decrease_break(&mut self) -> bool {
        step_down(&mut self.break_, BREAK_MIN, BREAK_STEP)
    }
}

fn step_up(value: &mut u32, max: u32, step: u32) -> bool {
    match value.checked_add(step) {
        Some(next) if next <= max => {
            *value = next;
            true
        }
        _ => false,
    }
}

fn step_down(value: &mut u32, min: u32, step: u32) -> bool {
    match value.checked_sub(step) {
        Some(next) if next >= min => {
            *value = next;
            true
        }
        _ => false,
    }
}

fn validate(key: &str, value: u32, min: u32, max: u32, step: u32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{value} is outside {min}..={max}"),
        });
    }
    if (value - min) % step != 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{value} is not a multiple of {step} minutes from {min}"),
        });
    }
    Ok(())
}
