//! Terminal rendering
//!
//! Layers, leaves first: `progress` formats a single progress sample,
//! `message` decides what one message writes, and `display` drives a whole
//! stream through both.

pub mod clock;
pub mod display;
pub mod message;
pub mod progress;
pub mod size;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use display::{display, StreamDisplay};
pub use message::{MessageRenderer, CLEAR_LINE, DEFAULT_WIDTH};
pub use progress::{ProgressFormatter, BAR_WIDTH};
pub use size::human_size;
