use std::io::{IsTerminal, Write};
use std::path::Path;
use std::time::Duration;

use clap::{Args, Subcommand};
use pomowidget_core::{
    cue, Command, Config, Durations, Event, ProgressMode, Silent, TickScheduler, Widget,
    WidgetView,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Args)]
pub struct DurationArgs {
    /// Focus length in minutes (5-60, step 5)
    #[arg(long)]
    focus: Option<u32>,
    /// Break length in minutes (1-15)
    #[arg(long = "break")]
    break_: Option<u32>,
    /// Advance progress in proportion to elapsed time
    #[arg(long)]
    proportional: bool,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the interactive widget; reads one command per line from stdin
    Run {
        #[command(flatten)]
        durations: DurationArgs,
        /// Do not ring the bell when an interval ends
        #[arg(long)]
        silent: bool,
    },
    /// Start a session, apply ticks without waiting, print the widget as JSON
    Simulate {
        #[command(flatten)]
        durations: DurationArgs,
        /// Number of one-second ticks to apply
        #[arg(long, default_value = "0")]
        ticks: u64,
        /// Pause after this many ticks; later ticks are then no-ops
        #[arg(long)]
        pause_after: Option<u64>,
        /// Stop the session once all ticks are applied
        #[arg(long)]
        stop: bool,
        /// Include the final engine state snapshot in the report
        #[arg(long)]
        snapshot: bool,
    },
}

#[derive(Serialize)]
struct SimulationReport {
    ticks: u64,
    expiries: usize,
    view: WidgetView,
    #[serde(skip_serializing_if = "Option::is_none")]
    snapshot: Option<Event>,
}

fn resolve(
    config: &Config,
    args: &DurationArgs,
) -> Result<(Durations, ProgressMode), Box<dyn std::error::Error>> {
    let durations = Durations::new(
        args.focus.unwrap_or(config.durations.focus),
        args.break_.unwrap_or(config.durations.break_),
    )?;
    let mode = if args.proportional {
        ProgressMode::Proportional
    } else {
        config.timer.progress_mode
    };
    Ok((durations, mode))
}

pub fn run(
    action: TimerAction,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::config::load(config_path)?;

    match action {
        TimerAction::Run { durations, silent } => {
            let (durations, mode) = resolve(&config, &durations)?;
            let cue = cue::from_setting(config.notifications.sound && !silent);
            let widget = Widget::new(durations, mode, cue);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(interactive(widget, config.tick_interval()))?;
        }
        TimerAction::Simulate {
            durations,
            ticks,
            pause_after,
            stop,
            snapshot,
        } => {
            let (durations, mode) = resolve(&config, &durations)?;
            let mut widget = Widget::new(durations, mode, Box::new(Silent));
            widget.apply(Command::PlayPause);

            let mut expiries = 0;
            for n in 0..ticks {
                if pause_after == Some(n) && widget.is_running() {
                    widget.apply(Command::PlayPause);
                }
                if widget.tick().is_some_and(|event| event.is_expiry()) {
                    expiries += 1;
                }
            }
            if stop {
                widget.apply(Command::Stop);
            }

            let report = SimulationReport {
                ticks,
                expiries,
                view: widget.view(),
                snapshot: snapshot.then(|| widget.engine().snapshot()),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

async fn interactive(
    mut widget: Widget,
    period: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, mut rx) = mpsc::channel(4);
    let mut scheduler = TickScheduler::new(period);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    draw(&widget.view())?;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                if matches!(input, "q" | "quit" | "exit") {
                    break;
                }
                match input.parse::<Command>() {
                    Ok(command) => {
                        if let Some(event) = widget.apply(command) {
                            tracing::debug!(?event, "command applied");
                        }
                    }
                    Err(e) => {
                        eprintln!("{e}");
                        continue;
                    }
                }
                scheduler.sync(widget.is_running(), &tx);
                draw(&widget.view())?;
            }
            Some(tick) = rx.recv() => {
                if !scheduler.is_current(&tick) {
                    continue;
                }
                widget.tick();
                draw(&widget.view())?;
            }
        }
    }

    scheduler.stop();
    Ok(())
}

fn draw(view: &WidgetView) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    if out.is_terminal() {
        // Clear screen and home the cursor.
        write!(out, "\x1b[2J\x1b[H")?;
    }
    writeln!(out, "{}\n", view.render_text())?;
    out.flush()
}
