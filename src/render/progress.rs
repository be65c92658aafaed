//! Progress sample formatting
//!
//! Produces the counts/ETA text for a progress sample and, on wide enough
//! terminals, prefixes it with a fixed-width bar:
//!
//! ```text
//! [==========>                                        ]      20B/100B 4s
//! ```

use std::sync::Arc;

use chrono::DateTime;

use crate::message::Progress;
use crate::render::clock::{Clock, SharedClock, SystemClock};
use crate::render::size::human_size;

/// Number of fill cells inside the bar brackets
pub const BAR_WIDTH: usize = 50;

/// Terminal width above which the bar is drawn
const BAR_MIN_TERMINAL_WIDTH: u16 = 110;

/// Terminal width above which the ETA is shown
const ETA_MIN_TERMINAL_WIDTH: u16 = 50;

/// Column width of the byte-scaled current amount
const COUNT_COLUMN_WIDTH: usize = 8;

const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Formats progress samples against a time source.
#[derive(Clone)]
pub struct ProgressFormatter {
    clock: SharedClock,
}

impl ProgressFormatter {
    /// A formatter using the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// A formatter using the given clock for ETA computation
    #[must_use]
    pub fn with_clock(clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    /// A formatter sharing an existing clock
    #[must_use]
    pub fn with_shared_clock(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// The clock this formatter reads
    #[must_use]
    pub const fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Render `progress` for a terminal `width` columns wide.
    ///
    /// Returns the short form (counts and ETA) when the bar does not fit or
    /// the total is unknown, otherwise the bar followed by the short form.
    #[must_use]
    pub fn render(&self, progress: &Progress, width: u16) -> String {
        if progress.current <= 0 && progress.total <= 0 {
            return String::new();
        }

        if progress.total <= 0 {
            if progress.hide_counts {
                return String::new();
            }
            return unbounded_counts(progress);
        }

        let mut line = String::new();
        if width > BAR_MIN_TERMINAL_WIDTH {
            line.push_str(&draw_bar(filled_cells(progress)));
        }
        if progress.hide_counts {
            return line;
        }

        line.push_str(&bounded_counts(progress));
        if width > ETA_MIN_TERMINAL_WIDTH {
            if let Some(secs) = self.eta_secs(progress) {
                line.push_str(&format!(" {secs}s"));
            }
        }
        line
    }

    /// Estimated whole seconds remaining, if one can be given.
    fn eta_secs(&self, progress: &Progress) -> Option<i128> {
        if progress.start <= 0 || progress.current <= 0 || progress.total <= progress.current {
            return None;
        }

        let started = DateTime::from_timestamp(progress.start, 0)?;
        let elapsed = self
            .clock
            .now()
            .signed_duration_since(started)
            .num_nanoseconds()?;
        if elapsed <= 0 {
            return None;
        }

        let per_unit = i128::from(elapsed) / i128::from(progress.current);
        let remaining = per_unit * i128::from(progress.total - progress.current);
        let secs = (remaining + NANOS_PER_SEC / 2) / NANOS_PER_SEC;
        (secs > 0).then_some(secs)
    }
}

impl Default for ProgressFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProgressFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressFormatter").finish_non_exhaustive()
    }
}

/// Number of `=` cells, clamped to the bar.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn filled_cells(progress: &Progress) -> usize {
    let percent = (progress.current as f64 / progress.total as f64 * 100.0) as i64;
    (percent / 2).clamp(0, BAR_WIDTH as i64) as usize
}

fn draw_bar(filled: usize) -> String {
    format!(
        "[{}>{}] ",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH.saturating_sub(filled))
    )
}

fn padded_bytes(bytes: i64) -> String {
    format!("{:>width$}", human_size(bytes), width = COUNT_COLUMN_WIDTH)
}

fn unbounded_counts(progress: &Progress) -> String {
    if progress.units.is_empty() {
        padded_bytes(progress.current)
    } else {
        format!("{} {}", progress.current, progress.units)
    }
}

/// Counts against a known total; the total is dropped once `current` overshoots it.
fn bounded_counts(progress: &Progress) -> String {
    if progress.current > progress.total {
        return unbounded_counts(progress);
    }
    if progress.units.is_empty() {
        format!(
            "{}/{}",
            padded_bytes(progress.current),
            human_size(progress.total)
        )
    } else {
        format!(
            "{}/{} {}",
            progress.current, progress.total, progress.units
        )
    }
}
