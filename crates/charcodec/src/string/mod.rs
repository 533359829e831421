//! Text stored as validated UTF-8 and walked by code point.

mod iter;

#[cfg(test)]
mod tests;

use core::{
    fmt,
    ops::{Add, AddAssign},
};

use bstr::ByteSlice;

pub use iter::{Chars, StringIter, StringIterPair};

use crate::{Char, error::InvalidUtf8};

/// Something characters can be written to one at a time.
pub trait CharSink {
    /// Appends one character. [`Char::EOF`] is ignored.
    fn put_char(&mut self, ch: Char);

    /// Appends every character of `s`.
    fn put_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.put_char(Char::from(ch));
        }
    }
}

/// An owned string of code points, stored as UTF-8.
///
/// There is no character count or index; text is reached through
/// [`StringIter`] cursors, which borrow the string and so cannot outlive a
/// mutation of it.
///
/// # Examples
///
/// ```rust
/// use charcodec::{Char, Utf8String};
///
/// let s = Utf8String::from("key = value");
/// let eq = s.find_first_char(Char::from('='));
/// assert_eq!(eq.first.substr_before().trim_copy().as_str(), "key");
/// assert_eq!(eq.second.substr_after().trim_copy().as_str(), "value");
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf8String(String);

impl Utf8String {
    /// An empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// An empty string with room for `bytes` bytes.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self(String::with_capacity(bytes))
    }

    /// Takes ownership of `bytes` after checking they are well-formed UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUtf8`] with the length of the valid prefix.
    pub fn from_utf8(bytes: Vec<u8>) -> Result<Self, InvalidUtf8> {
        String::from_utf8(bytes)
            .map(Self)
            .map_err(|err| err.utf8_error().into())
    }

    /// Copies `bytes` after checking they are well-formed UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUtf8`] with the length of the valid prefix.
    pub fn from_utf8_slice(bytes: &[u8]) -> Result<Self, InvalidUtf8> {
        Ok(Self(core::str::from_utf8(bytes)?.to_owned()))
    }

    /// Copies the text between two cursors into the same string.
    ///
    /// # Panics
    ///
    /// Panics if the cursors belong to different strings.
    #[must_use]
    pub fn from_range(first: StringIter<'_>, second: StringIter<'_>) -> Self {
        Self::from(StringIterPair::new(first, second).as_str())
    }

    /// The text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The UTF-8 bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// The UTF-8 bytes, by value.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }

    /// Converts into a standard string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Size of the UTF-8 encoding in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Removes every character.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Reserves room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional);
    }

    /// Appends one character. [`Char::EOF`] is not a character and is
    /// ignored.
    pub fn push(&mut self, ch: Char) {
        if let Some(ch) = ch.to_char() {
            self.0.push(ch);
        }
    }

    /// Appends `s`.
    pub fn push_str(&mut self, s: &str) {
        self.0.push_str(s);
    }

    /// Appends another string.
    pub fn push_string(&mut self, s: &Utf8String) {
        self.0.push_str(&s.0);
    }

    /// A cursor on the first character.
    #[must_use]
    pub fn begin(&self) -> StringIter<'_> {
        StringIter::new(self, 0)
    }

    /// A cursor past the last character.
    #[must_use]
    pub fn end(&self) -> StringIter<'_> {
        StringIter::new(self, self.0.len())
    }

    /// The characters, front to back.
    #[must_use]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(&self.0)
    }

    /// The first character, or [`Char::EOF`] if empty.
    #[must_use]
    pub fn front(&self) -> Char {
        self.0.chars().next().map_or(Char::EOF, Char::from)
    }

    /// The last character, or [`Char::EOF`] if empty.
    #[must_use]
    pub fn back(&self) -> Char {
        self.0.chars().next_back().map_or(Char::EOF, Char::from)
    }

    fn pair(&self, found: Option<(usize, usize)>) -> StringIterPair<'_> {
        let (first, second) = found.unwrap_or((self.0.len(), self.0.len()));
        StringIterPair {
            first: StringIter::new(self, first),
            second: StringIter::new(self, second),
        }
    }

    /// The first occurrence of `needle`, or `(end, end)` if there is none.
    #[must_use]
    pub fn find_first(&self, needle: &str) -> StringIterPair<'_> {
        self.pair(
            self.as_bytes()
                .find(needle)
                .map(|start| (start, start + needle.len())),
        )
    }

    /// The first occurrence of `ch`, or `(end, end)` if there is none.
    #[must_use]
    pub fn find_first_char(&self, ch: Char) -> StringIterPair<'_> {
        let mut buf = [0u8; 4];
        match ch.to_char() {
            Some(ch) => self.find_first(ch.encode_utf8(&mut buf)),
            None => StringIterPair::new(self.end(), self.end()),
        }
    }

    /// The last occurrence of `needle`, or `(end, end)` if there is none.
    #[must_use]
    pub fn find_last(&self, needle: &str) -> StringIterPair<'_> {
        self.pair(
            self.as_bytes()
                .rfind(needle)
                .map(|start| (start, start + needle.len())),
        )
    }

    /// The last occurrence of `ch`, or `(end, end)` if there is none.
    #[must_use]
    pub fn find_last_char(&self, ch: Char) -> StringIterPair<'_> {
        let mut buf = [0u8; 4];
        match ch.to_char() {
            Some(ch) => self.find_last(ch.encode_utf8(&mut buf)),
            None => StringIterPair::new(self.end(), self.end()),
        }
    }

    /// A copy with ASCII letters in upper case.
    #[must_use]
    pub fn to_upper_copy(&self) -> Self {
        self.chars().map(Char::to_upper).collect()
    }

    /// A copy with ASCII letters in lower case.
    #[must_use]
    pub fn to_lower_copy(&self) -> Self {
        self.chars().map(Char::to_lower).collect()
    }

    /// Equality ignoring ASCII case.
    #[must_use]
    pub fn caseless_eq(&self, other: &str) -> bool {
        self.0.len() == other.len()
            && self
                .chars()
                .zip(other.chars())
                .all(|(a, b)| a.to_upper() == Char::from(b).to_upper())
    }

    /// Whether the text starts with `prefix`.
    #[must_use]
    pub fn begins_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Whether the text ends with `suffix`.
    #[must_use]
    pub fn ends_with(&self, suffix: &str) -> bool {
        self.0.ends_with(suffix)
    }

    /// Whether the text starts with `prefix`, ignoring ASCII case.
    #[must_use]
    pub fn caseless_begins_with(&self, prefix: &str) -> bool {
        let mut chars = self.chars();
        prefix.chars().all(|p| {
            chars
                .next()
                .is_some_and(|c| c.to_upper() == Char::from(p).to_upper())
        })
    }

    /// A copy without leading and trailing whitespace, as classified by
    /// [`Char::is_whitespace`].
    #[must_use]
    pub fn trim_copy(&self) -> Self {
        let is_ws = |c: char| Char::from(c).is_whitespace();
        Self::from(self.0.trim_matches(is_ws))
    }

    /// The text as little endian UTF-16 bytes, without a terminator.
    #[must_use]
    pub fn to_utf16le(&self) -> Vec<u8> {
        self.0.encode_utf16().flat_map(u16::to_le_bytes).collect()
    }
}

impl From<&str> for Utf8String {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Utf8String {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<Char> for Utf8String {
    fn from(ch: Char) -> Self {
        let mut s = Self::new();
        s.push(ch);
        s
    }
}

impl From<Utf8String> for String {
    fn from(s: Utf8String) -> Self {
        s.0
    }
}

impl AsRef<str> for Utf8String {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Utf8String {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Utf8String {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl FromIterator<Char> for Utf8String {
    fn from_iter<I: IntoIterator<Item = Char>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

impl Extend<Char> for Utf8String {
    fn extend<I: IntoIterator<Item = Char>>(&mut self, iter: I) {
        for ch in iter {
            self.push(ch);
        }
    }
}

impl<'a> IntoIterator for &'a Utf8String {
    type Item = Char;
    type IntoIter = Chars<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}

impl Add<&Utf8String> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: &Utf8String) -> Self::Output {
        self.push_string(rhs);
        self
    }
}

impl Add<&str> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: &str) -> Self::Output {
        self.push_str(rhs);
        self
    }
}

impl Add<Char> for Utf8String {
    type Output = Utf8String;

    fn add(mut self, rhs: Char) -> Self::Output {
        self.push(rhs);
        self
    }
}

impl AddAssign<&Utf8String> for Utf8String {
    fn add_assign(&mut self, rhs: &Utf8String) {
        self.push_string(rhs);
    }
}

impl AddAssign<&str> for Utf8String {
    fn add_assign(&mut self, rhs: &str) {
        self.push_str(rhs);
    }
}

impl AddAssign<Char> for Utf8String {
    fn add_assign(&mut self, rhs: Char) {
        self.push(rhs);
    }
}

impl CharSink for Utf8String {
    fn put_char(&mut self, ch: Char) {
        self.push(ch);
    }

    fn put_str(&mut self, s: &str) {
        self.push_str(s);
    }
}

impl fmt::Write for Utf8String {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Utf8String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
