//! Lookahead scanner over a borrowed [`CharSource`].
//!
//! Every read and peek goes through the [`Lookahead`] buffer. Peeks pull
//! characters from the source into the back of the buffer; consuming reads
//! take them off the front. That gives unlimited lookahead, and lets a
//! failed parse put characters back (see [`numeric`]) so the caller sees
//! the stream exactly as it was before the attempt.
//!
//! # End of source
//!
//! Running out of input is [`ScanError::EndOfSource`]. A few readers accept
//! it partway through:
//!
//! - [`discard_whitespace`](Scanner::discard_whitespace) fails only if the
//!   source was already empty;
//! - [`read_token`](Scanner::read_token) and [`read_line`](Scanner::read_line)
//!   return what they collected when input ends after at least one character;
//! - a `\r` at the very end of input is a complete line terminator.

mod numeric;

use tracing::{debug, trace};

use crate::lookahead::Lookahead;
use crate::{CharSource, ScanError, ScanResult};

/// Tokenizing reader with unlimited lookahead.
///
/// The scanner borrows its source for `'s` and never closes or resets it.
/// Characters still held in the lookahead buffer when the scanner is dropped
/// are lost to the source; drain them with [`read_all`](Self::read_all) first
/// if they matter.
///
/// Not thread-safe: all operations take `&mut self` and may block on the
/// source.
pub struct Scanner<'s, S: CharSource + ?Sized> {
    source: &'s mut S,
    lookahead: Lookahead,
}

impl<'s, S: CharSource + ?Sized> Scanner<'s, S> {
    pub fn new(source: &'s mut S) -> Self {
        Self {
            source,
            lookahead: Lookahead::new(),
        }
    }

    /// Number of characters pulled from the source but not yet consumed.
    pub fn buffered(&self) -> usize {
        self.lookahead.len()
    }

    // === Source access ===

    /// Pull one character straight from the source.
    fn pull(&mut self) -> ScanResult<Option<char>> {
        self.source.next_char().map_err(|error| {
            debug!(%error, buffered = self.lookahead.len(), "character source failed");
            ScanError::Source(error)
        })
    }

    /// Pull one character into the back of the buffer.
    ///
    /// Returns `false` if the source is exhausted.
    fn fill_one(&mut self) -> ScanResult<bool> {
        match self.pull()? {
            Some(c) => {
                self.lookahead.push_back(c);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Consume the character returned by the preceding successful peek.
    #[inline]
    fn advance(&mut self) {
        let consumed = self.lookahead.pop_front();
        debug_assert!(consumed.is_some(), "advance() without a peeked character");
    }

    /// Put `consumed` back ahead of everything still buffered.
    fn rollback(&mut self, consumed: &str) {
        if consumed.is_empty() {
            return;
        }
        trace!(
            consumed,
            buffered = self.lookahead.len(),
            "rolling back partial token"
        );
        self.lookahead.restore(consumed);
    }

    /// Run `scan` against a fresh buffer of consumed text, undoing it on failure.
    ///
    /// Whatever `scan` consumed before returning an error goes back to the
    /// front of the lookahead buffer, so a failed read leaves the stream as
    /// it found it.
    fn speculate(
        &mut self,
        scan: impl FnOnce(&mut Self, &mut String) -> ScanResult<()>,
    ) -> ScanResult<String> {
        let mut consumed = String::new();
        match scan(self, &mut consumed) {
            Ok(()) => Ok(consumed),
            Err(e) => {
                self.rollback(&consumed);
                Err(e)
            }
        }
    }

    // === Peek ===

    /// Next character without consuming it, or `None` at end of source.
    pub fn try_peek(&mut self) -> ScanResult<Option<char>> {
        if self.lookahead.is_empty() && !self.fill_one()? {
            return Ok(None);
        }
        Ok(self.lookahead.front())
    }

    /// Next character without consuming it.
    ///
    /// Pulls at most one character from the source, and only when the
    /// buffer is empty.
    pub fn peek(&mut self) -> ScanResult<char> {
        self.try_peek()?.ok_or(ScanError::EndOfSource)
    }

    /// Returns `true` if no characters remain in the buffer or the source.
    pub fn is_at_end(&mut self) -> ScanResult<bool> {
        Ok(self.try_peek()?.is_none())
    }

    /// Look at least `n` characters ahead.
    ///
    /// Pulls from the source until the buffer holds `n` characters or the
    /// source runs out, then returns the whole buffer. The slice can be
    /// shorter than `n` near end of source, and longer than `n` if earlier
    /// peeks already buffered more. Fails only if the buffer is empty.
    pub fn peek_n(&mut self, n: usize) -> ScanResult<&[char]> {
        while self.lookahead.len() < n && self.fill_one()? {}
        if self.lookahead.is_empty() {
            return Err(ScanError::EndOfSource);
        }
        Ok(self.lookahead.as_slice())
    }

    // === Raw reads ===

    fn try_read_char(&mut self) -> ScanResult<Option<char>> {
        match self.lookahead.pop_front() {
            Some(c) => Ok(Some(c)),
            None => self.pull(),
        }
    }

    /// Consume and return the next character, whitespace included.
    pub fn read_char(&mut self) -> ScanResult<char> {
        self.try_read_char()?.ok_or(ScanError::EndOfSource)
    }

    /// Consume everything: the buffer, then the rest of the source.
    ///
    /// Returns an empty string when nothing is left. If the source fails
    /// partway, the characters collected so far go back into the buffer.
    pub fn read_all(&mut self) -> ScanResult<String> {
        let mut text = self.lookahead.drain_to_string();
        loop {
            match self.pull() {
                Ok(Some(c)) => text.push(c),
                Ok(None) => return Ok(text),
                Err(e) => {
                    self.lookahead.restore(&text);
                    return Err(e);
                }
            }
        }
    }

    // === Whitespace and words ===

    /// Consume whitespace up to the next non-whitespace character.
    ///
    /// Returns how many characters were discarded. Fails with
    /// [`ScanError::EndOfSource`] only when the source was already
    /// exhausted on entry.
    pub fn discard_whitespace(&mut self) -> ScanResult<usize> {
        let mut discarded = 0;
        loop {
            match self.try_peek()? {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                    discarded += 1;
                }
                Some(_) => return Ok(discarded),
                None if discarded > 0 => return Ok(discarded),
                None => return Err(ScanError::EndOfSource),
            }
        }
    }

    /// Read the next whitespace-delimited word.
    ///
    /// The whitespace after the word is left in the buffer. Never returns an
    /// empty string: trailing whitespace followed by end of source is
    /// [`ScanError::EndOfSource`].
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_token(&mut self) -> ScanResult<String> {
        self.discard_whitespace()?;
        let token = self.speculate(|this, token| {
            while let Some(c) = this.try_peek()? {
                if c.is_whitespace() {
                    break;
                }
                token.push(c);
                this.advance();
            }
            Ok(())
        })?;
        if token.is_empty() {
            Err(ScanError::EndOfSource)
        } else {
            Ok(token)
        }
    }

    // === Lines and delimiters ===

    /// Read up to the next line terminator, which is consumed but not returned.
    ///
    /// `\r\n`, lone `\r` and lone `\n` all end a line. The last line does not
    /// need a terminator. Fails with [`ScanError::EndOfSource`] only when no
    /// characters remain at all.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_line(&mut self) -> ScanResult<String> {
        let mut line = self.speculate(|this, line| {
            while let Some(c) = this.try_read_char()? {
                line.push(c);
                match c {
                    '\n' => break,
                    '\r' => {
                        if this.try_peek()? == Some('\n') {
                            this.advance();
                            line.push('\n');
                        }
                        break;
                    }
                    _ => {}
                }
            }
            Ok(())
        })?;
        if line.is_empty() {
            return Err(ScanError::EndOfSource);
        }
        let terminator = ["\r\n", "\n", "\r"]
            .into_iter()
            .find(|t| line.ends_with(t))
            .map_or(0, str::len);
        line.truncate(line.len() - terminator);
        Ok(line)
    }

    /// Read everything before the next occurrence of `delimiter`.
    ///
    /// The delimiter is matched but left in the buffer, so the next read
    /// starts with it; calling `read_until` again with the same delimiter
    /// returns `""`. Use [`read_through`](Self::read_through) to step past it.
    ///
    /// If the delimiter never appears, everything read is put back and
    /// [`ScanError::EndOfSource`] is returned.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_until(&mut self, delimiter: &str) -> ScanResult<String> {
        let mut text = self.scan_past(delimiter)?;
        let body_len = text.len() - delimiter.len();
        self.lookahead.restore(&text[body_len..]);
        text.truncate(body_len);
        Ok(text)
    }

    /// Read everything before the next `delimiter`, consuming the delimiter too.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn read_through(&mut self, delimiter: &str) -> ScanResult<String> {
        let mut text = self.scan_past(delimiter)?;
        text.truncate(text.len() - delimiter.len());
        Ok(text)
    }

    /// Consume characters until the consumed text ends with `delimiter`.
    ///
    /// The returned text includes the delimiter.
    fn scan_past(&mut self, delimiter: &str) -> ScanResult<String> {
        if delimiter.is_empty() {
            return Err(ScanError::EmptyDelimiter);
        }
        self.speculate(|this, text| loop {
            let Some(c) = this.try_read_char()? else {
                return Err(ScanError::EndOfSource);
            };
            text.push(c);
            if text.ends_with(delimiter) {
                trace!(delimiter, len = text.len(), "delimiter matched");
                return Ok(());
            }
        })
    }
}
