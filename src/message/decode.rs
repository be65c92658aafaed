//! Newline-delimited JSON decoding
//!
//! Each non-blank input line holds one message object.

use std::io::BufRead;

use crate::error::DisplayError;
use crate::message::types::Message;

/// Parse a single line of input into a `Message`.
///
/// Returns `Ok(None)` if the line is blank.
pub fn parse_message(line: &str) -> Result<Option<Message>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Iterator over the messages of a line-delimited JSON reader.
///
/// Yields an error for an unreadable or malformed line; the caller decides
/// whether to keep pulling.
pub struct MessageReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> MessageReader<R> {
    /// Wrap a buffered reader
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far
    #[must_use]
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for MessageReader<R> {
    type Item = Result<Message, DisplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(DisplayError::Io(err))),
            }
            self.line_no += 1;

            match parse_message(&self.buf) {
                Ok(Some(message)) => return Some(Ok(message)),
                Ok(None) => {
                    tracing::trace!(line = self.line_no, "skipping blank line");
                }
                Err(source) => {
                    return Some(Err(DisplayError::Decode {
                        line: self.line_no,
                        source,
                    }))
                }
            }
        }
    }
}
