//! Decoded stream events
//!
//! Empty strings stand for absent text fields, matching the wire format
//! where producers omit or blank them interchangeably.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StreamError;

/// A point-in-time progress sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    /// Amount completed so far (may exceed `total`)
    #[serde(default)]
    pub current: i64,
    /// Target amount; zero or negative means unknown
    #[serde(default)]
    pub total: i64,
    /// Start of the operation in epoch seconds; zero disables the ETA
    #[serde(default)]
    pub start: i64,
    /// Hide the numeric counts, keeping only the bar
    #[serde(default, rename = "hidecounts")]
    pub hide_counts: bool,
    /// Unit label; empty means bytes with automatic scaling
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub units: String,
}

impl Progress {
    /// A byte count with unknown total
    #[must_use]
    pub fn bytes(current: i64) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }

    /// A byte count towards a known total
    #[must_use]
    pub fn of(current: i64, total: i64) -> Self {
        Self {
            current,
            total,
            ..Self::default()
        }
    }
}

/// One decoded stream event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireMessage")]
pub struct Message {
    /// Sub-operation this event belongs to
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Short status text
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// Raw text emitted verbatim; wins over status and progress
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stream: String,
    /// Origin of the event, shown as `(from ...)`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Event time in epoch seconds
    #[serde(skip_serializing_if = "is_zero")]
    pub time: i64,
    /// Event time in epoch nanoseconds; preferred over `time`
    #[serde(rename = "timeNano", skip_serializing_if = "is_zero")]
    pub time_nano: i64,
    /// Structured progress payload
    #[serde(rename = "progressDetail", skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    /// Pre-rendered progress text from older producers
    #[serde(rename = "progress", skip_serializing_if = "String::is_empty")]
    pub progress_message: String,
    /// Failure payload
    #[serde(rename = "errorDetail", skip_serializing_if = "Option::is_none")]
    pub error: Option<StreamError>,
    /// Out-of-band payload for an aux callback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux: Option<Value>,
}

impl Message {
    /// A message carrying only status text
    #[must_use]
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }

    /// A message carrying only stream text
    #[must_use]
    pub fn with_stream(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
            ..Self::default()
        }
    }

    /// A message carrying only an error payload
    #[must_use]
    pub fn with_error(code: i64, message: impl Into<String>) -> Self {
        Self {
            error: Some(StreamError::new(code, message)),
            ..Self::default()
        }
    }

    /// Whether nothing at all is set on this message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Wire shape, including the legacy plain-string `error` field.
#[derive(Deserialize)]
struct WireMessage {
    #[serde(default)]
    id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    stream: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    time: i64,
    #[serde(default, rename = "timeNano")]
    time_nano: i64,
    #[serde(default, rename = "progressDetail")]
    progress: Option<Progress>,
    #[serde(default, rename = "progress")]
    progress_message: String,
    #[serde(default, rename = "errorDetail")]
    error: Option<StreamError>,
    #[serde(default, rename = "error")]
    legacy_error: String,
    #[serde(default)]
    aux: Option<Value>,
}

impl From<WireMessage> for Message {
    fn from(wire: WireMessage) -> Self {
        let error = match wire.error {
            Some(mut detail) => {
                if detail.message.is_empty() {
                    detail.message = wire.legacy_error;
                }
                Some(detail)
            }
            None if !wire.legacy_error.is_empty() => Some(StreamError::new(0, wire.legacy_error)),
            None => None,
        };

        Self {
            id: wire.id,
            status: wire.status,
            stream: wire.stream,
            from: wire.from,
            time: wire.time,
            time_nano: wire.time_nano,
            progress: wire.progress,
            progress_message: wire.progress_message,
            error,
            aux: wire.aux.filter(|v| !v.is_null()),
        }
    }
}
