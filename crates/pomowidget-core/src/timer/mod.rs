mod durations;
mod engine;
mod session;

pub use durations::{
    Durations, BREAK_MAX, BREAK_MIN, BREAK_STEP, DEFAULT_BREAK, DEFAULT_FOCUS, FOCUS_MAX,
    FOCUS_MIN, FOCUS_STEP,
};
pub use engine::{TimerEngine, TimerState};
pub use session::{
    ProgressMode, Session, SessionLabel, BREAK_PROGRESS_PER_TICK, FOCUS_PROGRESS_PER_TICK,
};
