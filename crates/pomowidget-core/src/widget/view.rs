//! Render model for every part of the widget.
//!
//! These structs carry exactly the text and accessibility values a host
//! needs to draw the widget; they hold no behaviour of their own.

use serde::Serialize;

use crate::timer::{SessionLabel, TimerEngine};

/// Format seconds as "HH:MM:SS".
pub fn format_hms(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

/// Format whole minutes as "MM:00".
pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:00", minutes)
}

/// One of the two duration adjusters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjusterView {
    pub label: String,
    pub minutes: u32,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayPauseIcon {
    Play,
    Pause,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlsView {
    pub play_pause: PlayPauseIcon,
    pub stop_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressBarView {
    pub aria_value_now: f64,
    pub width: String,
}

/// Shown only while a session is running or paused.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionDisplay {
    pub label: SessionLabel,
    pub title: String,
    pub sub_title: String,
    pub time_remaining: u64,
    pub progress: ProgressBarView,
}

impl SessionDisplay {
    pub fn from_engine(engine: &TimerEngine) -> Option<Self> {
        let session = engine.session()?;
        let minutes = engine.minutes_for(session.label);
        Some(Self {
            label: session.label,
            title: format!("{} for {} minutes", session.label, format_minutes(minutes)),
            sub_title: format!("{} remaining", format_hms(session.time_remaining)),
            time_remaining: session.time_remaining,
            progress: ProgressBarView {
                aria_value_now: session.progress,
                width: format!("{}%", session.progress),
            },
        })
    }
}

/// Everything the host draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub focus: AdjusterView,
    #[serde(rename = "break")]
    pub break_: AdjusterView,
    pub controls: ControlsView,
    pub session: Option<SessionDisplay>,
}

impl WidgetView {
    pub fn from_engine(engine: &TimerEngine) -> Self {
        let durations = engine.durations();
        let locked = !engine.can_adjust();
        Self {
            focus: AdjusterView {
                label: format!("Focus Duration: {}", format_minutes(durations.focus())),
                minutes: durations.focus(),
                disabled: locked,
            },
            break_: AdjusterView {
                label: format!("Break Duration: {}", format_minutes(durations.break_())),
                minutes: durations.break_(),
                disabled: locked,
            },
            controls: ControlsView {
                play_pause: if engine.is_running() {
                    PlayPauseIcon::Pause
                } else {
                    PlayPauseIcon::Play
                },
                stop_disabled: engine.session().is_none(),
            },
            session: SessionDisplay::from_engine(engine),
        }
    }

    /// Plain-text rendering for terminals.
    pub fn render_text(&self) -> String {
        let mut out = format!(
            "{}{}  |  {}{}\n",
            self.focus.label,
            lock_marker(self.focus.disabled),
            self.break_.label,
            lock_marker(self.break_.disabled),
        );
        match &self.session {
            Some(display) => {
                out.push_str(&display.title);
                out.push('\n');
                out.push_str(&display.sub_title);
                out.push('\n');
                out.push_str(&progress_bar(display.progress.aria_value_now, 40));
                out.push('\n');
            }
            None => out.push_str("No active session\n"),
        }
        let action = match self.controls.play_pause {
            PlayPauseIcon::Play => "play",
            PlayPauseIcon::Pause => "pause",
        };
        out.push_str(&format!(
            "[p] {}  [s] stop{}  [f+/f-] focus  [b+/b-] break  [q] quit",
            action,
            if self.controls.stop_disabled { " (disabled)" } else { "" },
        ));
        out
    }
}

fn lock_marker(disabled: bool) -> &'static str {
    if disabled {
        " (locked)"
    } else {
        ""
    }
}

fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.1}%",
        "#".repeat(filled),
        "-".repeat(width - filled.min(width)),
        percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Durations;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(1499), "00:24:59");
        assert_eq!(format_hms(3600), "01:00:00");
    }

    #[test]
    fn idle_view_hides_session_and_disables_stop() {
        let engine = TimerEngine::new(Durations::default());
        let view = WidgetView::from_engine(&engine);
        assert_eq!(view.focus.label, "Focus Duration: 25:00");
        assert_eq!(view.break_.label, "Break Duration: 05:00");
        assert!(!view.focus.disabled);
        assert!(view.controls.stop_disabled);
        assert_eq!(view.controls.play_pause, PlayPauseIcon::Play);
        assert!(view.session.is_none());
    }

    #[test]
    fn running_view_shows_session_display() {
        let mut engine = TimerEngine::new(Durations::default());
        engine.start();
        engine.tick();
        let view = WidgetView::from_engine(&engine);
        assert!(view.focus.disabled);
        assert!(view.break_.disabled);
        assert!(!view.controls.stop_disabled);
        assert_eq!(view.controls.play_pause, PlayPauseIcon::Pause);

        let display = view.session.unwrap();
        assert_eq!(display.title, "Focusing for 25:00 minutes");
        assert_eq!(display.sub_title, "00:24:59 remaining");
        assert_eq!(display.progress.aria_value_now, 0.067);
        assert_eq!(display.progress.width, "0.067%");
    }

    #[test]
    fn paused_view_keeps_session_visible() {
        let mut engine = TimerEngine::new(Durations::default());
        engine.start();
        engine.pause();
        let view = WidgetView::from_engine(&engine);
        assert_eq!(view.controls.play_pause, PlayPauseIcon::Play);
        assert!(view.session.is_some());
        assert!(view.focus.disabled);
    }

    #[test]
    fn break_title_uses_break_duration() {
        let mut engine = TimerEngine::new(Durations::new(5, 3).unwrap());
        engine.start();
        for _ in 0..301 {
            engine.tick();
        }
        let display = SessionDisplay::from_engine(&engine).unwrap();
        assert_eq!(display.title, "On Break for 03:00 minutes");
        assert_eq!(display.sub_title, "00:03:00 remaining");
    }

    #[test]
    fn text_rendering_mentions_session() {
        let mut engine = TimerEngine::new(Durations::default());
        engine.start();
        let text = WidgetView::from_engine(&engine).render_text();
        assert!(text.contains("Focusing for 25:00 minutes"));
        assert!(text.contains("00:25:00 remaining"));
        assert!(text.contains("[p] pause"));
    }
}
