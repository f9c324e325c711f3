//! Colored terminal output for packaging runs.
//!
//! Progress goes to stdout, warnings to stderr. Colors are only emitted when
//! the stream is a terminal. Quiet mode suppresses everything except warnings
//! and the lines printed through [`OutputManager::result`].

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes human readable progress lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

/// Color mode for a stream: colored only on a terminal.
fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn write_styled(
    mut stream: StandardStream,
    spec: Option<&ColorSpec>,
    text: &str,
) -> io::Result<()> {
    if let Some(spec) = spec {
        stream.set_color(spec)?;
        write!(stream, "{text}")?;
        stream.reset()?;
        writeln!(stream)
    } else {
        writeln!(stream, "{text}")
    }
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `verbose` enables indented detail lines; `quiet` overrides it and
    /// silences progress output.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn stdout(&self) -> StandardStream {
        StandardStream::stdout(color_choice(io::stdout().is_terminal()))
    }

    fn stderr(&self) -> StandardStream {
        StandardStream::stderr(color_choice(io::stderr().is_terminal()))
    }

    /// Print a section header in bold.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        write_styled(self.stdout(), Some(&spec), &format!("==> {title}"))
    }

    /// Print a progress message.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_styled(self.stdout(), None, message)
    }

    /// Print an indented detail line (verbose mode only).
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet || !self.verbose {
            return Ok(());
        }
        write_styled(self.stdout(), None, &format!("    {message}"))
    }

    /// Print a success message in green.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Green));
        write_styled(self.stdout(), Some(&spec), &format!("✓ {message}"))
    }

    /// Print a yellow warning to stderr, even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        write_styled(self.stderr(), Some(&spec), &format!("warning: {message}"))
    }

    /// Print a line that is always shown.
    pub fn result(&self, message: &str) -> io::Result<()> {
        write_styled(self.stdout(), None, message)
    }
}
