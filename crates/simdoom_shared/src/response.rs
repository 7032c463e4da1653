//! # Response Serialization
//!
//! Zero-allocation response building.
//!
//! - One buffer sized for the largest response, allocated with the writer
//! - Every write is bounds-checked and reports failure instead of panicking
//! - The status word is always the last thing written

use bytemuck::{bytes_of, Pod};

use crate::constants::MAX_RESPONSE_SIZE;
use crate::protocol::StatusWord;

/// Writes response payloads into a reused fixed buffer.
#[derive(Clone)]
pub struct ResponseWriter {
    buffer: [u8; MAX_RESPONSE_SIZE],
    position: usize,
}

impl ResponseWriter {
    /// Creates a writer with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0u8; MAX_RESPONSE_SIZE],
            position: 0,
        }
    }

    /// Resets the writer for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.position
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Returns the written bytes.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.position]
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) -> bool {
        self.write_bytes(&[value])
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) -> bool {
        let end = self.position + bytes.len();
        if end > MAX_RESPONSE_SIZE {
            return false;
        }
        self.buffer[self.position..end].copy_from_slice(bytes);
        self.position = end;
        true
    }

    /// Writes a Pod record directly.
    #[inline]
    pub fn write_pod<T: Pod>(&mut self, value: &T) -> bool {
        self.write_bytes(bytes_of(value))
    }

    /// Writes a status word (big-endian).
    #[inline]
    pub fn write_status(&mut self, status: StatusWord) -> bool {
        self.write_bytes(&status.to_bytes())
    }

    /// Replaces the whole response with a bare status word.
    pub fn status_only(&mut self, status: StatusWord) -> &[u8] {
        self.reset();
        let _ = self.write_status(status);
        self.as_slice()
    }
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseWriter")
            .field("len", &self.position)
            .finish_non_exhaustive()
    }
}
