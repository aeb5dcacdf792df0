//! The widget context: one engine, one audio cue, and the user commands that
//! drive them.

mod view;

pub use view::{
    format_hms, format_minutes, AdjusterView, ControlsView, PlayPauseIcon, ProgressBarView,
    SessionDisplay, WidgetView,
};

use std::str::FromStr;

use crate::cue::AudioCue;
use crate::error::CoreError;
use crate::events::Event;
use crate::timer::{Durations, ProgressMode, TimerEngine};

/// A button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Stop,
    IncreaseFocus,
    DecreaseFocus,
    IncreaseBreak,
    DecreaseBreak,
}

impl FromStr for Command {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "p" | "play" | "pause" | "play-pause" => Ok(Command::PlayPause),
            "s" | "stop" => Ok(Command::Stop),
            "f+" | "focus+" | "increase-focus" => Ok(Command::IncreaseFocus),
            "f-" | "focus-" | "decrease-focus" => Ok(Command::DecreaseFocus),
            "b+" | "break+" | "increase-break" => Ok(Command::IncreaseBreak),
            "b-" | "break-" | "decrease-break" => Ok(Command::DecreaseBreak),
            other => Err(CoreError::UnknownCommand(other.to_string())),
        }
    }
}

pub struct Widget {
    engine: TimerEngine,
    cue: Box<dyn AudioCue>,
}

impl Widget {
    pub fn new(durations: Durations, mode: ProgressMode, cue: Box<dyn AudioCue>) -> Self {
        Self {
            engine: TimerEngine::new(durations).with_progress_mode(mode),
            cue,
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn apply(&mut self, command: Command) -> Option<Event> {
        tracing::trace!(?command, "applying command");
        match command {
            Command::PlayPause => self.engine.play_pause(),
            Command::Stop => self.engine.stop(),
            Command::IncreaseFocus => self.engine.increase_focus(),
            Command::DecreaseFocus => self.engine.decrease_focus(),
            Command::IncreaseBreak => self.engine.increase_break(),
            Command::DecreaseBreak => self.engine.decrease_break(),
        }
    }

    /// Advance one second, sounding the cue if the interval rolled over.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.engine.tick()?;
        if event.is_expiry() {
            self.cue.play();
        }
        Some(event)
    }

    pub fn view(&self) -> WidgetView {
        WidgetView::from_engine(&self.engine)
    }
}
