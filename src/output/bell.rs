//! Terminal bell on session completion.

use std::io::Write;

use crate::core::{Event, Observer};

/// Rings the terminal bell when a session completes.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    /// Create a bell that writes to `out`.
    pub const fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<std::io::Stdout> {
    /// Create a bell on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Observer for TerminalBell<W> {
    fn on_event(&mut self, event: &Event) {
        if matches!(event, Event::Completed { .. }) {
            if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
                log::debug!("bell output failed: {e}");
            }
        }
    }
}
