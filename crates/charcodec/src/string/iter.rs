use core::{cmp::Ordering, fmt, ptr};

use bstr::ByteSlice;

use super::Utf8String;
use crate::Char;

/// A cursor on a character boundary of a [`Utf8String`].
///
/// The cursor can move in both directions; reading it at the end gives
/// [`Char::EOF`]. Cursors compare by position and are only comparable with
/// cursors into the same string.
#[derive(Clone, Copy)]
pub struct StringIter<'a> {
    s: &'a Utf8String,
    pos: usize,
}

#[inline]
fn is_continuation(b: u8) -> bool {
    b & 0xc0 == 0x80
}

impl<'a> StringIter<'a> {
    pub(super) fn new(s: &'a Utf8String, pos: usize) -> Self {
        debug_assert!(s.as_str().is_char_boundary(pos));
        Self { s, pos }
    }

    /// The string this cursor walks.
    #[must_use]
    pub fn source(&self) -> &'a Utf8String {
        self.s
    }

    /// Byte offset of the cursor.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// The character under the cursor, or [`Char::EOF`] at the end.
    #[must_use]
    pub fn get(&self) -> Char {
        let rest = &self.s.as_bytes()[self.pos..];
        if rest.is_empty() {
            Char::EOF
        } else {
            Char::from_utf8(rest).1
        }
    }

    /// Whether the cursor is on the first character.
    #[must_use]
    pub fn at_begin(&self) -> bool {
        self.pos == 0
    }

    /// Whether the cursor is past the last character.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos == self.s.byte_len()
    }

    /// Moves to the next character. Does nothing at the end.
    pub fn advance(&mut self) {
        let rest = &self.s.as_bytes()[self.pos..];
        if !rest.is_empty() {
            self.pos += Char::from_utf8(rest).0;
        }
    }

    /// Moves to the previous character. Does nothing at the start.
    pub fn retreat(&mut self) {
        let bytes = self.s.as_bytes();
        while self.pos > 0 {
            self.pos -= 1;
            if !is_continuation(bytes[self.pos]) {
                break;
            }
        }
    }

    /// A copy moved to the next character.
    #[must_use]
    pub fn next_pos(mut self) -> Self {
        self.advance();
        self
    }

    /// A copy moved to the previous character.
    #[must_use]
    pub fn prev_pos(mut self) -> Self {
        self.retreat();
        self
    }

    /// The first occurrence of `needle` at or after the cursor, or
    /// `(end, end)` if there is none.
    #[must_use]
    pub fn find_next(&self, needle: &str) -> StringIterPair<'a> {
        let found = self.s.as_bytes()[self.pos..]
            .find(needle)
            .map(|i| self.pos + i);
        let (first, second) = match found {
            Some(start) => (start, start + needle.len()),
            None => (self.s.byte_len(), self.s.byte_len()),
        };
        StringIterPair::new(Self::new(self.s, first), Self::new(self.s, second))
    }

    /// The first occurrence of `ch` at or after the cursor, or `(end, end)`
    /// if there is none.
    #[must_use]
    pub fn find_next_char(&self, ch: Char) -> StringIterPair<'a> {
        let mut buf = [0u8; 4];
        match ch.to_char() {
            Some(ch) => self.find_next(ch.encode_utf8(&mut buf)),
            None => {
                let end = self.s.end();
                StringIterPair::new(end, end)
            }
        }
    }

    /// The text from the start of the string up to the cursor.
    #[must_use]
    pub fn substr_before(&self) -> Utf8String {
        Utf8String::from(&self.s.as_str()[..self.pos])
    }

    /// The text from the cursor to the end of the string.
    #[must_use]
    pub fn substr_after(&self) -> Utf8String {
        Utf8String::from(&self.s.as_str()[self.pos..])
    }
}

impl PartialEq for StringIter<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.s, other.s) && self.pos == other.pos
    }
}

impl Eq for StringIter<'_> {}

impl PartialOrd for StringIter<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        ptr::eq(self.s, other.s).then(|| self.pos.cmp(&other.pos))
    }
}

impl fmt::Debug for StringIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringIter")
            .field("pos", &self.pos)
            .field("ch", &self.get())
            .finish()
    }
}

/// A range of a [`Utf8String`] between two cursors, as returned by the
/// searches.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct StringIterPair<'a> {
    /// Start of the range.
    pub first: StringIter<'a>,
    /// End of the range, exclusive.
    pub second: StringIter<'a>,
}

impl<'a> StringIterPair<'a> {
    /// Pairs two cursors into the same string.
    ///
    /// # Panics
    ///
    /// Panics if the cursors belong to different strings or are out of
    /// order.
    #[must_use]
    pub fn new(first: StringIter<'a>, second: StringIter<'a>) -> Self {
        assert!(ptr::eq(first.s, second.s), "cursors into different strings");
        assert!(first.pos <= second.pos, "cursors out of order");
        Self { first, second }
    }

    /// Whether the range is the `(end, end)` marker of a failed search.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.first.at_end()
    }

    /// The text of the range.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        &self.first.s.as_str()[self.first.pos..self.second.pos]
    }

    /// A copy of the text of the range.
    #[must_use]
    pub fn to_utf8_string(&self) -> Utf8String {
        Utf8String::from(self.as_str())
    }
}

/// The characters of a string in either direction.
#[derive(Clone, Debug)]
pub struct Chars<'a>(core::str::Chars<'a>);

impl<'a> Chars<'a> {
    pub(super) fn new(s: &'a str) -> Self {
        Self(s.chars())
    }

    /// The characters not yet visited.
    #[must_use]
    pub fn as_str(&self) -> &'a str {
        self.0.as_str()
    }
}

impl Iterator for Chars<'_> {
    type Item = Char;

    fn next(&mut self) -> Option<Char> {
        self.0.next().map(Char::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Chars<'_> {
    fn next_back(&mut self) -> Option<Char> {
        self.0.next_back().map(Char::from)
    }
}

impl core::iter::FusedIterator for Chars<'_> {}
