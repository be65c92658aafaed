//! Stream message model and decoding
//!
//! Defines the decoded event types and a reader that turns newline-delimited
//! JSON into `Message` values.

pub mod decode;
pub mod types;

pub use decode::{parse_message, MessageReader};
pub use types::{Message, Progress};
