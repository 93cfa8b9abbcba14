//! Bounded line input
//!
//! [`read_bounded`] is the primitive: it copies at most `capacity - 1` bytes of
//! one line into a caller-supplied buffer, stores the newline if it fits, and
//! always writes a `0` terminator directly after the data. It never writes past
//! the end of the slice it is given, whatever the length of the incoming line.
//!
//! [`LineBuffer`] owns a fixed-capacity buffer and remembers how much of it the
//! last read filled.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::io::{self, BufRead};

/// What to do with the part of a line that did not fit the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExcessPolicy {
    /// Leave the excess on the stream for the next read (line-read semantics)
    #[default]
    Keep,
    /// Consume and drop the remainder of the current line
    Discard,
}

/// Read at most `buf.len() - 1` bytes of one line from `reader` into `buf`
///
/// Reading stops after a newline (which is stored), when the buffer is full, or
/// at end of stream. A `0` byte is written right after the data in every case.
///
/// Returns `Ok(None)` if the stream was already exhausted and nothing was read,
/// otherwise `Ok(Some(count))` with the number of bytes stored, terminator
/// excluded. A one-byte buffer only receives the terminator and returns
/// `Some(0)` without touching the stream.
///
/// # Errors
///
/// - [`Error::InvalidCapacity`] when `buf` is empty
/// - [`Error::Io`] when the reader fails
pub fn read_bounded<R: BufRead + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    policy: ExcessPolicy,
) -> Result<Option<usize>> {
    let capacity = buf.len();
    if capacity == 0 {
        return Err(Error::InvalidCapacity { capacity });
    }

    let limit = capacity - 1;
    let mut count = 0;
    let mut ends_line = false;
    let mut exhausted = false;

    while count < limit {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                buf[count] = 0;
                return Err(err.into());
            }
        };
        if available.is_empty() {
            exhausted = true;
            break;
        }

        let window = &available[..available.len().min(limit - count)];
        let take = match window.iter().position(|&b| b == b'\n') {
            Some(idx) => {
                ends_line = true;
                idx + 1
            }
            None => window.len(),
        };
        buf[count..count + take].copy_from_slice(&window[..take]);
        reader.consume(take);
        count += take;

        if ends_line {
            break;
        }
    }

    buf[count] = 0;

    if count == 0 && exhausted {
        return Ok(None);
    }

    if limit > 0 && count == limit && !ends_line {
        match policy {
            ExcessPolicy::Keep => {
                log::warn!(
                    "line did not fit in {} bytes; remainder left on the stream",
                    limit
                );
            }
            ExcessPolicy::Discard => {
                let dropped = discard_line(reader)?;
                if dropped > 0 {
                    log::warn!(
                        "line did not fit in {} bytes; dropped {} excess bytes",
                        limit,
                        dropped
                    );
                }
            }
        }
    }

    Ok(Some(count))
}

/// Consume everything up to and including the next newline
///
/// Returns the number of bytes dropped before the newline.
fn discard_line<R: BufRead + ?Sized>(reader: &mut R) -> Result<usize> {
    let mut dropped = 0;
    loop {
        let available = match reader.fill_buf() {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if available.is_empty() {
            return Ok(dropped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(idx) => {
                reader.consume(idx + 1);
                return Ok(dropped + idx);
            }
            None => {
                let n = available.len();
                reader.consume(n);
                dropped += n;
            }
        }
    }
}

/// Fixed-capacity line buffer
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bytes: Box<[u8]>,
    len: usize,
    policy: ExcessPolicy,
}

impl LineBuffer {
    /// Create a zeroed buffer of `capacity` bytes, terminator included
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] for a capacity of zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_policy(capacity, ExcessPolicy::default())
    }

    /// Like [`LineBuffer::new`], choosing what happens to overlong lines
    pub fn with_policy(capacity: usize, policy: ExcessPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity { capacity });
        }
        Ok(LineBuffer {
            bytes: vec![0; capacity].into_boxed_slice(),
            len: 0,
            policy,
        })
    }

    /// Read the next line (or as much of it as fits)
    ///
    /// Returns `false` at end of stream, in which case the buffer is left empty.
    pub fn read_from<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> Result<bool> {
        self.len = 0;
        match read_bounded(reader, &mut self.bytes, self.policy)? {
            Some(count) => {
                self.len = count;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Total size, terminator byte included
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes stored by the last read
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stored bytes, without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Stored bytes followed by the terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Whether the last read captured a complete line, newline included
    pub fn ends_line(&self) -> bool {
        self.as_bytes().last() == Some(&b'\n')
    }
}
