//! Character sources the scanner pulls from.
//!
//! A [`CharSource`] yields one `char` at a time and reports exhaustion as
//! `Ok(None)`. The scanner only ever borrows a source: it never closes,
//! rewinds, or drops it, so the same source can be handed to another scanner
//! (or read directly) once the first one is done.

use std::io::{self, Read};
use std::str::Chars;

use tracing::trace;

/// Default size of the [`ReaderSource`] refill buffer.
const REFILL_LEN: usize = 8 * 1024;

/// Longest UTF-8 sequence; the refill buffer never shrinks below this.
const MAX_UTF8_LEN: usize = 4;

/// Sequential provider of characters.
pub trait CharSource {
    /// Pull the next character.
    ///
    /// Returns `Ok(None)` once the source is exhausted. Errors are source
    /// faults (I/O failure, undecodable input) and are passed to the caller
    /// unchanged.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }
}

/// Characters of an in-memory string.
#[derive(Clone, Debug)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { chars: text.chars() }
    }

    /// The part of the string not yet pulled.
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Adapter for any `char` iterator.
#[derive(Clone, Debug)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    pub fn new(iter: I) -> Self {
        Self { iter }
    }

    pub fn into_inner(self) -> I {
        self.iter
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    #[inline]
    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.iter.next())
    }
}

/// UTF-8 decoder over a byte reader.
///
/// Bytes are pulled through a fixed-size buffer. A multi-byte sequence split
/// across two reads is carried over to the front of the buffer before the
/// next refill. Malformed UTF-8, including a sequence cut short by the end of
/// the reader, is reported as [`io::ErrorKind::InvalidData`] with the byte
/// offset of the offending sequence.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Box<[u8]>,
    /// Next unread byte in `buf`.
    pos: usize,
    /// End of valid bytes in `buf`.
    end: usize,
    /// Bytes decoded so far, for error messages.
    offset: u64,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, REFILL_LEN)
    }

    /// Create a source with a refill buffer of `capacity` bytes (at least 4).
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buf: vec![0; capacity.max(MAX_UTF8_LEN)].into_boxed_slice(),
            pos: 0,
            end: 0,
            offset: 0,
        }
    }

    /// Byte offset of the next character in the underlying reader.
    pub fn byte_offset(&self) -> u64 {
        self.offset
    }

    /// Give back the reader. Bytes already pulled into the buffer are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Move unread bytes to the front and read more after them.
    ///
    /// Returns `false` when the reader reports end of input.
    fn refill(&mut self) -> io::Result<bool> {
        self.buf.copy_within(self.pos..self.end, 0);
        self.end -= self.pos;
        self.pos = 0;
        loop {
            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    trace!(bytes = n, "refilled reader buffer");
                    self.end += n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn invalid_data(&self, what: &str) -> io::Error {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{what} at byte offset {}", self.offset),
        )
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        if self.pos == self.end && !self.refill()? {
            return Ok(None);
        }

        let lead = self.buf[self.pos];
        if lead.is_ascii() {
            self.pos += 1;
            self.offset += 1;
            return Ok(Some(char::from(lead)));
        }

        let Some(width) = utf8_sequence_len(lead) else {
            return Err(self.invalid_data("invalid UTF-8 lead byte"));
        };
        while self.end - self.pos < width {
            if !self.refill()? {
                return Err(self.invalid_data("truncated UTF-8 sequence"));
            }
        }

        let decoded = std::str::from_utf8(&self.buf[self.pos..self.pos + width])
            .ok()
            .and_then(|s| s.chars().next());
        match decoded {
            Some(c) => {
                self.pos += width;
                self.offset += width as u64;
                Ok(Some(c))
            }
            None => Err(self.invalid_data("invalid UTF-8 sequence")),
        }
    }
}

/// Length of the UTF-8 sequence introduced by a non-ASCII `lead` byte.
///
/// Continuation bytes and lead bytes that can only start overlong or
/// out-of-range sequences return `None`.
fn utf8_sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
