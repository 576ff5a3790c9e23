//! Character cursor over a materialized source text.
//!
//! Reads one character at a time across line boundaries and supports a
//! single character of pushback right after a read. All multi-character
//! decisions (`//` vs `/*`, `*/`) are made by reading again.

use crate::error::{Location, ScanError};

pub struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
    /// Whether the last operation was a `next()` that may be undone.
    can_push_back: bool,
}

impl<'a> Cursor<'a> {
    /// Start reading `chars` at index `start`.
    pub fn new(chars: &'a [char], start: usize) -> Self {
        Self {
            chars,
            pos: start.min(chars.len()),
            can_push_back: false,
        }
    }

    /// Next character of the stream, or `UnterminatedInput` at the end.
    pub fn next(&mut self) -> Result<char, ScanError> {
        let c = *self.chars.get(self.pos).ok_or(ScanError::UnterminatedInput)?;
        self.pos += 1;
        self.can_push_back = true;
        Ok(c)
    }

    /// The character last returned by [`Cursor::next`].
    ///
    /// After [`Cursor::push_back`] this is the character before the one
    /// pushed back, or `None` at the start of the text.
    pub fn current(&self) -> Option<char> {
        self.pos.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    /// Rewind by exactly one character.
    ///
    /// # Panics
    ///
    /// Panics unless the previous call was a successful [`Cursor::next`].
    pub fn push_back(&mut self) {
        assert!(
            self.can_push_back,
            "push_back() is only valid once, immediately after next()"
        );
        self.pos -= 1;
        self.can_push_back = false;
    }

    /// Index of the next character to be read.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Line number and text around the last-read character.
    pub fn location(&self) -> Location {
        let at = self.pos.saturating_sub(1).min(self.chars.len());
        let start = self.chars[..at]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let end = self.chars[at..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |i| at + i);
        let line = 1 + self.chars[..start].iter().filter(|&&c| c == '\n').count();
        Location {
            line,
            text: self.chars[start..end].iter().collect(),
        }
    }
}
