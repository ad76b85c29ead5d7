//! Terminal collaborators: what screens print to and read from.
//!
//! Screens only see the [`Presenter`] and [`InputSource`] traits. The
//! concrete types here write to any `Write` and read from any `BufRead`,
//! so the same code drives a real terminal and in-memory test buffers.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::Stylize;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;

use crate::types::Severity;

use super::theme;

// ============================================================================
// TRAITS
// ============================================================================

/// Everything a screen can show.
pub trait Presenter {
    /// Framed, centered banner, one message per row.
    fn banner(&mut self, lines: &[&str]) -> io::Result<()>;
    /// Message framed by rules, tagged with its severity.
    fn message(&mut self, text: &str, severity: Severity) -> io::Result<()>;
    /// Plain text line (menu options).
    fn line(&mut self, text: &str) -> io::Result<()>;
    /// Text without a trailing newline, flushed so the user sees it before typing.
    fn prompt(&mut self, text: &str) -> io::Result<()>;
    /// Wipe the screen before a fresh render.
    fn clear(&mut self) -> io::Result<()>;
}

/// Where screens read user input from. `Ok(None)` means end of input.
pub trait InputSource {
    /// Next whitespace-delimited token, reading further lines as needed.
    fn read_token(&mut self) -> io::Result<Option<String>>;
    /// Rest of the current line, or the next whole line.
    ///
    /// Screens read tokens only, as every prompt takes a single word. This
    /// is for callers that want free-form text, such as names with spaces.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

// ============================================================================
// LAYOUT (pure)
// ============================================================================

/// Build the rows of a banner `width` columns wide.
///
/// Every row is `<...>`; message rows are centered between fill characters.
/// Messages longer than the frame simply overflow it.
pub fn banner_rows(lines: &[&str], width: usize) -> Vec<String> {
    let inner = width.saturating_sub(2);
    let border = format!("<{}>", theme::BANNER_FILL.to_string().repeat(inner));

    let mut rows = Vec::with_capacity(lines.len() + 2);
    rows.push(border.clone());
    for line in lines {
        let text_len = line.chars().count() + 2;
        let left = inner.saturating_sub(text_len) / 2;
        let right = inner.saturating_sub(left + text_len);
        rows.push(format!(
            "<{} {} {}>",
            theme::BANNER_FILL.to_string().repeat(left),
            line,
            theme::BANNER_FILL.to_string().repeat(right),
        ));
    }
    rows.push(border);
    rows
}

// ============================================================================
// TERMINAL PRESENTER
// ============================================================================

/// Presenter writing text to any sink.
pub struct TerminalPresenter<W: Write> {
    out: W,
    color: bool,
    /// Fixed banner width. None = ask the terminal.
    width: Option<usize>,
    /// Whether `clear` emits terminal control sequences.
    clears: bool,
}

impl TerminalPresenter<io::Stdout> {
    /// Presenter for the process's standard output.
    ///
    /// Color and screen clearing are only used when stdout is a terminal.
    pub fn stdout(color: bool) -> Self {
        let out = io::stdout();
        let tty = out.is_terminal();
        TerminalPresenter {
            out,
            color: color && tty,
            width: None,
            clears: tty,
        }
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Plain presenter: no color, no clearing, fixed 80-column banners.
    pub fn new(out: W) -> Self {
        TerminalPresenter {
            out,
            color: false,
            width: Some(theme::FALLBACK_WIDTH),
            clears: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal::size()
                .map(|(cols, _)| cols as usize)
                .ok()
                .filter(|cols| *cols > 0)
                .unwrap_or(theme::FALLBACK_WIDTH)
        })
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn banner(&mut self, lines: &[&str]) -> io::Result<()> {
        for row in banner_rows(lines, self.width()) {
            writeln!(self.out, "{}", row)?;
        }
        self.out.flush()
    }

    fn message(&mut self, text: &str, severity: Severity) -> io::Result<()> {
        let rule = "-".repeat(theme::MESSAGE_RULE_WIDTH);
        let prefix = theme::prefix(severity);
        writeln!(self.out, "{}", rule)?;
        if self.color {
            writeln!(self.out, "{}{}", prefix.with(theme::color(severity)), text)?;
        } else {
            writeln!(self.out, "{}{}", prefix, text)?;
        }
        writeln!(self.out, "{}", rule)?;
        self.out.flush()
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clears {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
            self.out.flush()?;
        }
        Ok(())
    }
}

// ============================================================================
// LINE INPUT
// ============================================================================

/// Token/line reader over any buffered reader.
///
/// Tokens are split from whole lines, so several answers typed on one
/// line feed several prompts in turn.
pub struct LineInput<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl LineInput<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        LineInput::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput {
            reader,
            pending: VecDeque::new(),
        }
    }

    /// Read one raw line. None at end of input.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed);
        Ok(Some(buf))
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            match self.next_line()? {
                Some(line) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_string)),
                None => return Ok(None),
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        if !self.pending.is_empty() {
            let rest: Vec<String> = self.pending.drain(..).collect();
            return Ok(Some(rest.join(" ")));
        }
        self.next_line()
    }
}

// ============================================================================
// TESTS
// ============================================================================
