//! Argument Diagnostics
//!
//! Bounded-length rendering of "expected, got" messages.
//! Messages are written into a fixed buffer; nothing here allocates.

use std::fmt::{self, Write};

/// Size of the message buffer, terminator slot included.
pub const MESSAGE_CAPACITY: usize = 256;

/// Longest message text that fits in the buffer.
pub const MESSAGE_MAX_LEN: usize = MESSAGE_CAPACITY - 1;

/// Fixed-capacity diagnostic text
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArgMessage {
    buf: [u8; MESSAGE_CAPACITY],
    len: usize,
    truncated: bool,
}

impl ArgMessage {
    /// Create an empty message
    pub const fn new() -> Self {
        ArgMessage {
            buf: [0; MESSAGE_CAPACITY],
            len: 0,
            truncated: false,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters are ever copied in.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether some of the rendered text did not fit
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl Default for ArgMessage {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ArgMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MESSAGE_MAX_LEN - self.len;
        let mut take = s.len().min(room);
        if take < s.len() {
            while !s.is_char_boundary(take) {
                take -= 1;
            }
            self.truncated = true;
        }
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

impl fmt::Display for ArgMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ArgMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgMessage")
            .field("text", &self.as_str())
            .field("truncated", &self.truncated)
            .finish()
    }
}

/// Render `"<requested> expected, got <actual>"`.
///
/// The requested name comes first, so overlong input cuts into the actual
/// type text before anything else.
pub fn format_mismatch(requested: &str, actual: &str) -> ArgMessage {
    let mut message = ArgMessage::new();
    // Writing into ArgMessage never fails; overflow only sets `truncated`.
    let _ = write!(message, "{} expected, got {}", requested, actual);
    message
}
