//! Colored terminal output utilities.
//!
//! Diagnostics go to stderr; command results go to stdout so they can be piped.

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    data: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            data: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted line of command output (cyan bold).
    pub(crate) fn highlight(&self, msg: &str) {
        let _ = self
            .data
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a line of command output.
    pub(crate) fn data(&self, line: &str) {
        let _ = self.data.write_line(line);
    }

    /// Print a de-emphasized line of command output.
    pub(crate) fn muted(&self, line: &str) {
        let _ = self.data.write_line(&self.dim.apply_to(line).to_string());
    }
}
