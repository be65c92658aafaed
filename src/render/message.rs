//! Per-message display decisions
//!
//! Decides whether a message becomes a status line, verbatim stream text,
//! an in-place progress redraw, or nothing at all.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::StreamError;
use crate::message::Message;
use crate::render::progress::ProgressFormatter;

/// Erase the current terminal line and return to column 0
pub const CLEAR_LINE: &str = "\x1b[2K\r";

/// Terminal width assumed when the caller gives none
pub const DEFAULT_WIDTH: u16 = 80;

/// Renders individual messages for a terminal of a given width.
#[derive(Debug, Clone)]
pub struct MessageRenderer {
    formatter: ProgressFormatter,
    width: u16,
}

impl MessageRenderer {
    /// A renderer using the system clock
    #[must_use]
    pub fn new(width: u16) -> Self {
        Self::with_formatter(ProgressFormatter::new(), width)
    }

    /// A renderer using the given progress formatter
    #[must_use]
    pub const fn with_formatter(formatter: ProgressFormatter, width: u16) -> Self {
        Self { formatter, width }
    }

    /// The same renderer targeting another width
    #[must_use]
    pub fn with_width(self, width: u16) -> Self {
        Self { width, ..self }
    }

    /// Target terminal width
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// The progress formatter in use
    #[must_use]
    pub const fn formatter(&self) -> &ProgressFormatter {
        &self.formatter
    }

    /// Compute the text `message` writes.
    ///
    /// Returns the carried error instead when the message has one. An empty
    /// string means the message produces no output.
    pub fn render(&self, message: &Message, is_terminal: bool) -> Result<String, StreamError> {
        if let Some(err) = &message.error {
            return Err(err.clone());
        }

        if !message.stream.is_empty() {
            return Ok(message.stream.clone());
        }

        let rendered = message
            .progress
            .as_ref()
            .map(|progress| self.formatter.render(progress, self.width));

        let mut out = String::new();
        match rendered {
            Some(bar) if is_terminal => {
                out.push_str(CLEAR_LINE);
                push_prefix(&mut out, message);
                out.push_str(&format!("{} {bar}\r", message.status));
            }
            Some(bar) if !bar.is_empty() => {
                tracing::trace!(id = %message.id, "progress update skipped for non-terminal output");
            }
            _ if !message.progress_message.is_empty() => {
                if is_terminal {
                    out.push_str(CLEAR_LINE);
                }
                push_prefix(&mut out, message);
                let endl = if is_terminal { '\r' } else { '\n' };
                out.push_str(&format!(
                    "{} {}{endl}",
                    message.status, message.progress_message
                ));
            }
            _ => {
                push_prefix(&mut out, message);
                out.push_str(&message.status);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

impl Default for MessageRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

/// Timestamp, id and origin, each followed by its separator.
fn push_prefix(out: &mut String, message: &Message) {
    if let Some(at) = timestamp(message) {
        out.push_str(&at.to_rfc3339_opts(SecondsFormat::Nanos, true));
        out.push(' ');
    }
    if !message.id.is_empty() {
        out.push_str(&message.id);
        out.push_str(": ");
    }
    if !message.from.is_empty() {
        out.push_str(&format!("(from {}) ", message.from));
    }
}

fn timestamp(message: &Message) -> Option<DateTime<Utc>> {
    if message.time_nano != 0 {
        Some(DateTime::from_timestamp_nanos(message.time_nano))
    } else if message.time != 0 {
        DateTime::from_timestamp(message.time, 0)
    } else {
        None
    }
}
