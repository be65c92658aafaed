//! Shared test utilities
//!
//! Common helpers used across test modules. Only compiled in test builds.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::DisplayError;
use crate::message::Message;
use crate::render::clock::FixedClock;
use crate::render::display::display;
use crate::render::message::MessageRenderer;
use crate::render::progress::ProgressFormatter;

/// The instant all clock-dependent tests are anchored to: `2017-12-03T15:10:01Z`.
#[must_use]
pub fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 12, 3, 15, 10, 1)
        .single()
        .unwrap_or_default()
}

/// A `MessageRenderer` whose clock is frozen at [`reference_time`].
#[must_use]
pub fn fixed_renderer(width: u16) -> MessageRenderer {
    MessageRenderer::with_formatter(
        ProgressFormatter::with_clock(FixedClock(reference_time())),
        width,
    )
}

/// Run `messages` through [`display`](crate::render::display) into a buffer,
/// returning what was written alongside the result.
pub fn render_all(
    messages: Vec<Message>,
    is_terminal: bool,
) -> (String, Result<(), DisplayError>) {
    let mut buf = Vec::new();
    let result = display(messages, &mut buf, is_terminal, 0);
    (String::from_utf8_lossy(&buf).into_owned(), result)
}
