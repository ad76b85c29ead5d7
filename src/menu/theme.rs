//! Message severity styling.
//!
//! Color semantics:
//! - Cyan: informational
//! - Yellow: warning, try again
//! - Red: error
//! - Green: success
//!
//! Pure data, consumed by the presenter.

use crossterm::style::Color;

use crate::types::Severity;

/// Width of the dashed rule framing every message.
pub const MESSAGE_RULE_WIDTH: usize = 70;

/// Fill character for banners.
pub const BANNER_FILL: char = '=';

/// Banner width when the terminal size is unknown.
pub const FALLBACK_WIDTH: usize = 80;

/// Fixed-width prefix so message bodies line up.
pub fn prefix(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[INFO]    ",
        Severity::Warning => "[WARNING] ",
        Severity::Error => "[ERROR]   ",
        Severity::Success => "[SUCCESS] ",
    }
}

pub fn color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
        Severity::Success => Color::Green,
    }
}
