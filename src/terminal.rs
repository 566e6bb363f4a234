//! Terminal channel
//!
//! Abstracts writing a prompt and reading one line back, with or without
//! echo. Hidden reads are a capability of interactive channels only; a
//! non-interactive channel falls back to a visible read with a warning.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::error::{PromptError, Result};

/// Warning written when echo cannot be suppressed
pub const ECHO_WARNING: &str =
    "Warning: Cannot control echo output on the terminal (stdin is not a tty). Input may be echoed.";

/// Line-oriented prompt I/O.
///
/// Implementors supply the primitive operations; [`TerminalChannel::read_line`]
/// builds the echo handling on top of them.
pub trait TerminalChannel {
    /// True when the input supports attended, echo-controlled reads
    fn is_interactive(&self) -> bool;

    /// Write text to the output without a newline and flush it
    fn write(&mut self, text: &str) -> Result<()>;

    /// Write a line to the diagnostic stream
    fn write_diagnostic(&mut self, text: &str) -> Result<()>;

    /// Read one visible line, terminator stripped
    fn read_visible(&mut self) -> Result<String>;

    /// Read one line without echoing keystrokes; only called when interactive
    fn read_hidden(&mut self) -> Result<String>;

    fn write_blank_line(&mut self) -> Result<()> {
        self.write("\n")
    }

    /// Show `message` and read a line.
    fn read_line(&mut self, message: &str, echo: bool) -> Result<String> {
        if echo {
            self.write(message)?;
            return self.read_visible();
        }

        if self.is_interactive() {
            self.write(message)?;
            return self.read_hidden();
        }

        self.write_diagnostic(ECHO_WARNING)?;
        self.write(message)?;
        let line = self.read_visible()?;
        self.write_blank_line()?;
        Ok(line)
    }
}

impl<T: TerminalChannel + ?Sized> TerminalChannel for &mut T {
    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }

    fn write(&mut self, text: &str) -> Result<()> {
        (**self).write(text)
    }

    fn write_diagnostic(&mut self, text: &str) -> Result<()> {
        (**self).write_diagnostic(text)
    }

    fn read_visible(&mut self) -> Result<String> {
        (**self).read_visible()
    }

    fn read_hidden(&mut self) -> Result<String> {
        (**self).read_hidden()
    }

    fn write_blank_line(&mut self) -> Result<()> {
        (**self).write_blank_line()
    }

    fn read_line(&mut self, message: &str, echo: bool) -> Result<String> {
        (**self).read_line(message, echo)
    }
}

/// Strip one trailing `\n` or `\r\n`.
pub fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

/// Process stdin/stdout/stderr.
#[derive(Debug)]
pub struct StdTerminal {
    interactive: bool,
}

impl StdTerminal {
    /// Detect interactivity from stdin.
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Treat the terminal as non-interactive even when stdin is a tty.
    pub fn force_non_interactive() -> Self {
        Self { interactive: false }
    }
}

impl Default for StdTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalChannel for StdTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn write(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    fn write_diagnostic(&mut self, text: &str) -> Result<()> {
        let mut err = io::stderr().lock();
        writeln!(err, "{}", text)?;
        err.flush()?;
        Ok(())
    }

    fn read_visible(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(PromptError::InputClosed);
        }
        strip_line_ending(&mut line);
        Ok(line)
    }

    fn read_hidden(&mut self) -> Result<String> {
        let line = {
            let _raw = RawModeGuard::enable()?;
            read_keys_until_enter()?
        };
        // Raw mode swallowed the operator's Enter
        self.write_blank_line()?;
        Ok(line)
    }
}

/// Leaves raw mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!("Failed to disable raw mode: {}", e);
        }
    }
}

fn read_keys_until_enter() -> Result<String> {
    let mut line = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        match code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char('c') if ctrl => return Err(PromptError::Interrupted),
            KeyCode::Char('d') if ctrl && line.is_empty() => return Err(PromptError::InputClosed),
            KeyCode::Char(c) if !ctrl => line.push(c),
            _ => {}
        }
    }
}

/// In-memory channel fed from a queue of response lines.
///
/// Everything written is captured so callers can inspect exactly what an
/// operator would have seen. Hidden reads pop from the same queue.
#[derive(Debug, Default, Clone)]
pub struct ScriptedTerminal {
    responses: VecDeque<String>,
    interactive: bool,
    output: String,
    diagnostics: Vec<String>,
    hidden_reads: usize,
}

impl ScriptedTerminal {
    /// Non-interactive channel answering with `responses` in order
    pub fn new<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Everything written to the output so far
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Responses not yet consumed
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }

    /// Number of reads served without echo
    pub fn hidden_reads(&self) -> usize {
        self.hidden_reads
    }

    fn next_response(&mut self) -> Result<String> {
        let mut line = self.responses.pop_front().ok_or(PromptError::InputClosed)?;
        strip_line_ending(&mut line);
        Ok(line)
    }
}

impl TerminalChannel for ScriptedTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn write_diagnostic(&mut self, text: &str) -> Result<()> {
        self.diagnostics.push(text.to_string());
        Ok(())
    }

    fn read_visible(&mut self) -> Result<String> {
        let line = self.next_response()?;
        // Mirror what a terminal shows when the operator types and presses Enter
        if self.interactive {
            self.output.push_str(&line);
            self.output.push('\n');
        }
        Ok(line)
    }

    fn read_hidden(&mut self) -> Result<String> {
        let line = self.next_response()?;
        self.hidden_reads += 1;
        self.output.push('\n');
        Ok(line)
    }
}
