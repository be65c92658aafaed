//! Error types
//!
//! `StreamError` is the failure an upstream message carries; `DisplayError`
//! is everything that can stop a display run.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An operation failure reported inside the message stream.
///
/// Displays exactly the carried message text. The code is informational
/// and never part of the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct StreamError {
    /// Numeric code reported by the producer (often an HTTP status)
    #[serde(default)]
    pub code: i64,
    /// Human-readable failure text
    #[serde(default)]
    pub message: String,
}

impl StreamError {
    /// Create a stream error from a code and message
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Errors that stop a display run.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// A message in the stream carried an error payload
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Writing to the output sink failed
    #[error("failed to write to output")]
    Io(#[from] io::Error),

    /// A line of the input could not be decoded
    #[error("malformed message on line {line}")]
    Decode {
        /// 1-indexed input line number
        line: usize,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

impl DisplayError {
    /// The upstream stream error, if that is what stopped the run
    #[must_use]
    pub const fn as_stream(&self) -> Option<&StreamError> {
        match self {
            Self::Stream(err) => Some(err),
            _ => None,
        }
    }
}
