//! Audio cue played when an interval expires.

use std::io::Write;

/// Something that can make a sound once.
pub trait AudioCue: Send {
    fn play(&mut self);
}

/// Rings the terminal bell by writing BEL to the wrapped writer.
pub struct TerminalBell<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalBell<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AudioCue for TerminalBell<W> {
    fn play(&mut self) {
        // A missing bell is not worth interrupting the timer for.
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "failed to ring terminal bell");
        }
    }
}

/// No sound at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self) {}
}

/// Pick the cue for the given `sound` setting.
pub fn from_setting(sound: bool) -> Box<dyn AudioCue> {
    if sound {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Silent)
    }
}
