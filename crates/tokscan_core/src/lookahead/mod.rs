//! FIFO lookahead buffer with front pushback.
//!
//! Holds characters pulled from the source but not yet consumed. Order in
//! the buffer is always source order: peeks append at the back, consuming
//! reads pop from the front, and rollback re-inserts at the front.
//!
//! Backed by a `VecDeque`, i.e. a growable ring buffer addressed by head
//! index and length. Growth only happens when lookahead runs further ahead
//! than it ever has before.

use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct Lookahead {
    chars: VecDeque<char>,
}

impl Lookahead {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Oldest buffered character.
    #[inline]
    pub fn front(&self) -> Option<char> {
        self.chars.front().copied()
    }

    /// Append a character freshly pulled from the source.
    #[inline]
    pub fn push_back(&mut self, c: char) {
        self.chars.push_back(c);
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<char> {
        self.chars.pop_front()
    }

    /// Re-insert `text` ahead of everything buffered, keeping its order.
    ///
    /// After `restore("ab")` on a buffer holding `c`, the buffer reads `abc`.
    pub fn restore(&mut self, text: &str) {
        for c in text.chars().rev() {
            self.chars.push_front(c);
        }
    }

    /// Contiguous view of the buffer, front first.
    pub fn as_slice(&mut self) -> &[char] {
        self.chars.make_contiguous()
    }

    /// Remove every buffered character, returning them in order.
    pub fn drain_to_string(&mut self) -> String {
        self.chars.drain(..).collect()
    }
}
