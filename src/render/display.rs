//! Whole-stream display
//!
//! Pulls messages one at a time, writes each before asking for the next,
//! and stops at the first message carrying an error.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::error::DisplayError;
use crate::message::{Message, MessageReader};
use crate::render::clock::{Clock, SharedClock};
use crate::render::message::{MessageRenderer, DEFAULT_WIDTH};
use crate::render::progress::ProgressFormatter;

type AuxCallback<'a> = Box<dyn FnMut(&Value) + 'a>;

/// Renders a sequence of messages to an output sink.
pub struct StreamDisplay<'a, W> {
    out: W,
    renderer: MessageRenderer,
    is_terminal: bool,
    start_timestamp: i64,
    on_aux: Option<AuxCallback<'a>>,
}

impl<'a, W: Write> StreamDisplay<'a, W> {
    /// Display to `out`, redrawing progress in place when `is_terminal`
    pub fn new(out: W, is_terminal: bool) -> Self {
        Self {
            out,
            renderer: MessageRenderer::new(DEFAULT_WIDTH),
            is_terminal,
            start_timestamp: 0,
            on_aux: None,
        }
    }

    /// Set the terminal width used for progress layout
    #[must_use]
    pub fn width(mut self, width: u16) -> Self {
        self.renderer = self.renderer.with_width(width);
        self
    }

    /// Use `clock` for ETA and elapsed-time computation
    #[must_use]
    pub fn clock(self, clock: impl Clock + Send + Sync + 'static) -> Self {
        self.shared_clock(std::sync::Arc::new(clock))
    }

    /// Use an existing shared clock
    #[must_use]
    pub fn shared_clock(mut self, clock: SharedClock) -> Self {
        let width = self.renderer.width();
        self.renderer =
            MessageRenderer::with_formatter(ProgressFormatter::with_shared_clock(clock), width);
        self
    }

    /// Write an elapsed-time trailer measured from `start` (epoch seconds);
    /// zero disables it
    #[must_use]
    pub fn start_timestamp(mut self, start: i64) -> Self {
        self.start_timestamp = start;
        self
    }

    /// Hand messages carrying an aux payload to `callback` instead of
    /// rendering them
    #[must_use]
    pub fn on_aux(mut self, callback: impl FnMut(&Value) + 'a) -> Self {
        self.on_aux = Some(Box::new(callback));
        self
    }

    /// Render every message until the sequence ends or one carries an error.
    pub fn display<I>(&mut self, messages: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = Message>,
    {
        self.display_results(messages.into_iter().map(Ok))
    }

    /// Render a fallible message sequence; the first `Err` stops the run.
    pub fn display_results<I>(&mut self, messages: I) -> Result<(), DisplayError>
    where
        I: IntoIterator<Item = Result<Message, DisplayError>>,
    {
        let mut count = 0usize;
        for message in messages {
            let message = message?;
            self.show(&message)?;
            count += 1;
        }
        tracing::debug!(count, "message stream finished");

        self.write_elapsed()?;
        self.out.flush()?;
        Ok(())
    }

    /// Decode newline-delimited JSON from `reader` and render it.
    pub fn display_reader<R: BufRead>(&mut self, reader: R) -> Result<(), DisplayError> {
        self.display_results(MessageReader::new(reader))
    }

    /// Consume the display and return the sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn show(&mut self, message: &Message) -> Result<(), DisplayError> {
        let text = self
            .renderer
            .render(message, self.is_terminal)
            .inspect_err(|err| {
                tracing::debug!(code = err.code, "stream reported an error, stopping");
            })?;

        if let Some(aux) = &message.aux {
            if let Some(callback) = self.on_aux.as_mut() {
                callback(aux);
            } else {
                tracing::trace!("aux payload ignored, no callback registered");
            }
            return Ok(());
        }

        if !text.is_empty() {
            self.out.write_all(text.as_bytes())?;
            // \r-terminated redraws never trigger a line-buffered flush
            self.out.flush()?;
        }
        Ok(())
    }

    fn write_elapsed(&mut self) -> Result<(), DisplayError> {
        if self.start_timestamp == 0 {
            return Ok(());
        }
        let now = self.renderer.formatter().clock().now().timestamp();
        let secs = now.saturating_sub(self.start_timestamp).max(0);
        writeln!(self.out, "Elapsed: {secs}s")?;
        Ok(())
    }
}

/// Render `messages` to `out` with default width and the system clock.
///
/// Returns the first error a message carries; a non-zero `start_timestamp`
/// adds an elapsed-time trailer once the sequence ends normally.
pub fn display<I, W>(
    messages: I,
    out: W,
    is_terminal: bool,
    start_timestamp: i64,
) -> Result<(), DisplayError>
where
    I: IntoIterator<Item = Message>,
    W: Write,
{
    StreamDisplay::new(out, is_terminal)
        .start_timestamp(start_timestamp)
        .display(messages)
}
