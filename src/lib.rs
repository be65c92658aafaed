//! Progressfeed - terminal rendering for JSON progress streams
//!
//! Turns a stream of decoded status/progress events from a long-running
//! operation into terminal output: status lines, in-place progress bars,
//! or an error that ends the stream.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod message;
pub mod render;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export commonly used types
pub use config::{FeedConfig, TerminalMode};
pub use error::{DisplayError, StreamError};
pub use message::{parse_message, Message, MessageReader, Progress};
pub use render::{
    display, Clock, FixedClock, MessageRenderer, ProgressFormatter,
    StreamDisplay, SystemClock,
};
