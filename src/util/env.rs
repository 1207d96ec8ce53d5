//! Terminal detection for colored output.

use std::io::IsTerminal;

/// Output stream a renderer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn is_terminal(self) -> bool {
        match self {
            Self::Stdout => std::io::stdout().is_terminal(),
            Self::Stderr => std::io::stderr().is_terminal(),
        }
    }
}

/// Whether styled output may be written to `stream`.
///
/// `NO_COLOR` and `TERM=dumb` disable styling even on a terminal.
#[must_use]
pub fn color_allowed(stream: Stream, no_color: bool) -> bool {
    if no_color || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var("TERM").is_ok_and(|term| term == "dumb") {
        return false;
    }
    stream.is_terminal()
}
