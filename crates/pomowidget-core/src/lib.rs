//! # Pomowidget Core Library
//!
//! The logic behind a single Pomodoro timer widget. Hosts (the terminal CLI,
//! or any GUI) feed button presses and one-second ticks in and draw the
//! [`WidgetView`] that comes out.
//!
//! ## Architecture
//!
//! - **Timer Engine**: tick-driven state machine alternating focus and break
//!   intervals
//! - **Widget**: context struct owning the engine and the expiry audio cue
//! - **Tick Scheduler**: cancellable tokio task that emits one tick per period
//!   while the timer runs
//! - **Storage**: read-only TOML configuration seeding the initial durations

pub mod cue;
pub mod error;
pub mod events;
pub mod storage;
pub mod ticker;
pub mod timer;
pub mod widget;

pub use cue::{AudioCue, Silent, TerminalBell};
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use ticker::{Tick, TickScheduler};
pub use timer::{Durations, ProgressMode, Session, SessionLabel, TimerEngine, TimerState};
pub use widget::{Command, SessionDisplay, Widget, WidgetView};
