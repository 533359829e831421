//! The internal code point type.
//!
//! A [`Char`] is either a Unicode scalar value (`[0, 0xD800)` or
//! `[0xE000, 0x110000)`) or the reserved end-of-input sentinel [`Char::EOF`].
//! The sentinel doubles as the "malformed" result of the `from_utf*`
//! constructors, since it can never be produced by valid input.
//!
//! Classification queries are defined for the ASCII range only, through a
//! property table. Above ASCII the only defined query is
//! [`Char::is_pp_identifier`], answered from a sorted range table.

mod tables;


use core::fmt;

use tables::{
    ASCII_MAX, BAD_SOURCE, DIGIT, HEX_LETTER, IDENTIFIER_RANGES, LOWERCASE, OTHER_BASIC_SOURCE,
    PROPERTIES, UNDERSCORE, UPPERCASE, WHITESPACE,
};

const EOF_VALUE: u32 = u32::MAX;

/// One code point, or the end-of-input sentinel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Char(u32);

impl Default for Char {
    /// The default character is [`Char::EOF`].
    fn default() -> Self {
        Self::EOF
    }
}

#[inline]
const fn is_scalar(value: u32) -> bool {
    value < 0xd800 || (value >= 0xe000 && value < 0x11_0000)
}

impl Char {
    /// The end-of-input sentinel.
    pub const EOF: Char = Char(EOF_VALUE);

    /// Creates a character from a code point value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is a surrogate or lies above `U+10FFFF`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        assert!(is_scalar(value), "not a Unicode scalar value");
        Char(value)
    }

    /// Creates a character from a code point value, or `None` if the value
    /// is a surrogate or lies above `U+10FFFF`.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        if is_scalar(value) {
            Some(Char(value))
        } else {
            None
        }
    }

    /// Creates a character from a 7 bit ASCII byte.
    ///
    /// # Panics
    ///
    /// Panics if `byte` is not ASCII.
    #[must_use]
    pub const fn from_ascii(byte: u8) -> Self {
        assert!(byte.is_ascii(), "not an ASCII byte");
        Char(byte as u32)
    }

    /// Returns the code point value, or `None` for [`Char::EOF`].
    #[must_use]
    pub const fn to_u32(self) -> Option<u32> {
        if self.0 == EOF_VALUE {
            None
        } else {
            Some(self.0)
        }
    }

    /// Returns the equivalent `char`, or `None` for [`Char::EOF`].
    #[must_use]
    pub const fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }

    #[inline]
    fn properties(self) -> u16 {
        if self.0 < ASCII_MAX {
            PROPERTIES[self.0 as usize]
        } else {
            0
        }
    }

    #[inline]
    fn has(self, mask: u16) -> bool {
        self.properties() & mask != 0
    }

    /// `A`-`Z`.
    #[must_use]
    pub fn is_upper(self) -> bool {
        self.has(UPPERCASE)
    }

    /// `a`-`z`.
    #[must_use]
    pub fn is_lower(self) -> bool {
        self.has(LOWERCASE)
    }

    /// An ASCII letter of either case.
    #[must_use]
    pub fn is_letter(self) -> bool {
        self.has(UPPERCASE | LOWERCASE)
    }

    /// `0`-`9`.
    #[must_use]
    pub fn is_decimal_digit(self) -> bool {
        self.has(DIGIT)
    }

    /// `0` or `1`.
    #[must_use]
    pub fn is_binary_digit(self) -> bool {
        matches!(self.0, 0x30..=0x31)
    }

    /// `0`-`7`.
    #[must_use]
    pub fn is_octal_digit(self) -> bool {
        matches!(self.0, 0x30..=0x37)
    }

    /// `0`-`9`, `A`-`F` or `a`-`f`.
    #[must_use]
    pub fn is_hex_digit(self) -> bool {
        self.has(DIGIT | HEX_LETTER)
    }

    /// One of the five characters `" \t\v\f\n"`. Carriage return is not
    /// whitespace since newlines are normalized to `\n` on input.
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        self.has(WHITESPACE)
    }

    /// A member of the C++ basic source character set.
    #[must_use]
    pub fn is_basic_source(self) -> bool {
        self.has(UPPERCASE | LOWERCASE | DIGIT | UNDERSCORE | WHITESPACE | OTHER_BASIC_SOURCE)
    }

    /// An ASCII control character outside the basic source set.
    #[must_use]
    pub fn is_bad_source(self) -> bool {
        self.has(BAD_SOURCE)
    }

    /// A character which may appear in a preprocessor identifier.
    #[must_use]
    pub fn is_pp_identifier(self) -> bool {
        if self.0 < ASCII_MAX {
            return self.has(UPPERCASE | LOWERCASE | DIGIT | UNDERSCORE);
        }
        if self.0 == EOF_VALUE {
            return false;
        }
        IDENTIFIER_RANGES
            .binary_search_by(|&(first, last)| {
                if last < self.0 {
                    core::cmp::Ordering::Less
                } else if first > self.0 {
                    core::cmp::Ordering::Greater
                } else {
                    core::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// The end-of-input sentinel.
    #[must_use]
    pub const fn is_eof(self) -> bool {
        self.0 == EOF_VALUE
    }

    /// `U+0000`-`U+007F`.
    #[must_use]
    pub const fn is_ascii(self) -> bool {
        self.0 < ASCII_MAX
    }

    /// Value of a decimal digit.
    #[must_use]
    pub fn decimal_value(self) -> Option<u32> {
        self.is_decimal_digit().then(|| self.0 - u32::from(b'0'))
    }

    /// Value of a binary digit.
    #[must_use]
    pub fn binary_value(self) -> Option<u32> {
        self.is_binary_digit().then(|| self.0 - u32::from(b'0'))
    }

    /// Value of an octal digit.
    #[must_use]
    pub fn octal_value(self) -> Option<u32> {
        self.is_octal_digit().then(|| self.0 - u32::from(b'0'))
    }

    /// Value of a hexadecimal digit of either case.
    #[must_use]
    pub fn hex_value(self) -> Option<u32> {
        if self.is_decimal_digit() {
            Some(self.0 - u32::from(b'0'))
        } else if !self.has(HEX_LETTER) {
            None
        } else if self.is_upper() {
            Some(self.0 - u32::from(b'A') + 10)
        } else {
            Some(self.0 - u32::from(b'a') + 10)
        }
    }

    /// ASCII upper case copy; other characters are returned unchanged.
    #[must_use]
    pub fn to_upper(self) -> Self {
        if self.is_lower() { Char(self.0 - 0x20) } else { self }
    }

    /// ASCII lower case copy; other characters are returned unchanged.
    #[must_use]
    pub fn to_lower(self) -> Self {
        if self.is_upper() { Char(self.0 + 0x20) } else { self }
    }

    /// The character for a decimal digit value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not below 10.
    #[must_use]
    pub fn decimal_digit(value: u32) -> Self {
        assert!(value < 10, "decimal digit out of range");
        Char(u32::from(b'0') + value)
    }

    /// The character for an octal digit value.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not below 8.
    #[must_use]
    pub fn octal_digit(value: u32) -> Self {
        assert!(value < 8, "octal digit out of range");
        Char(u32::from(b'0') + value)
    }

    /// The character for a hexadecimal digit value, with letters in upper
    /// or lower case.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not below 16.
    #[must_use]
    pub fn hex_digit(value: u32, upper: bool) -> Self {
        assert!(value < 16, "hex digit out of range");
        match value {
            0..=9 => Char(u32::from(b'0') + value),
            _ if upper => Char(u32::from(b'A') + value - 10),
            _ => Char(u32::from(b'a') + value - 10),
        }
    }

    /// Decodes one UTF-8 sequence from the front of `utf8`.
    ///
    /// Returns the number of bytes the sequence occupies together with the
    /// character, or [`Char::EOF`] when the sequence is malformed. The length
    /// is reported even for malformed sequences: it covers the lead byte and
    /// every continuation byte seen before the violation, so it is always
    /// at least 1 for non-empty input. Bytes past the end of `utf8` are
    /// treated as non-continuation bytes.
    ///
    /// # Panics
    ///
    /// Panics if `utf8` is empty.
    #[must_use]
    pub fn from_utf8(utf8: &[u8]) -> (usize, Char) {
        let b0 = utf8[0];
        if b0 < 0x80 {
            return (1, Char(u32::from(b0)));
        }

        // A continuation byte on its own is a one byte error.
        let len = match b0 {
            0xf0.. => 4,
            0xe0.. => 3,
            0xc0.. => 2,
            _ => return (1, Char::EOF),
        };

        // The accumulated value keeps the preamble bits of the lead byte.
        let mut ch = u32::from(b0);
        for pos in 1..len {
            match utf8.get(pos) {
                Some(&x) if (0x80..0xc0).contains(&x) => ch = (ch << 6) | u32::from(x & 0x3f),
                _ => return (pos, Char::EOF),
            }
        }

        let ch = match len {
            // U+0080 to U+07FF, preamble 0x3000
            2 if (0x3080..0x3800).contains(&ch) => ch & !0x3000,
            // U+0800 to U+FFFF excluding surrogates, preamble 0xe0000
            3 if (0x000e_0800..0x000f_0000).contains(&ch)
                && !(0x000e_d800..0x000e_e000).contains(&ch) =>
            {
                ch & !0x000e_0000
            }
            // U+10000 to U+10FFFF, preamble 0x3c00000
            4 if (0x03c1_0000..0x03d1_0000).contains(&ch) => ch & !0x03c0_0000,
            _ => return (len, Char::EOF),
        };
        (len, Char(ch))
    }

    /// Decodes one UTF-16 code point from the front of `utf16`.
    ///
    /// Returns the number of units used (1 or 2) and the character, or
    /// [`Char::EOF`] for an unpaired surrogate. An unpaired surrogate always
    /// reports a length of 1 so decoding can resume at the next unit.
    ///
    /// # Panics
    ///
    /// Panics if `utf16` is empty.
    #[must_use]
    pub fn from_utf16(utf16: &[u16]) -> (usize, Char) {
        let w0 = u32::from(utf16[0]);
        if !(0xd800..0xe000).contains(&w0) {
            return (1, Char(w0));
        }
        match utf16.get(1).map(|&w| u32::from(w)) {
            Some(w1) if w0 < 0xdc00 && (0xdc00..0xe000).contains(&w1) => {
                (2, Char((((w0 & 0x3ff) << 10) | (w1 & 0x3ff)) + 0x1_0000))
            }
            _ => (1, Char::EOF),
        }
    }

    /// Converts a UTF-32 value, returning [`Char::EOF`] if it is not a
    /// Unicode scalar value.
    #[must_use]
    pub const fn from_utf32(utf32: u32) -> Char {
        if is_scalar(utf32) { Char(utf32) } else { Char::EOF }
    }

    /// Number of bytes in the UTF-8 encoding of this character.
    #[must_use]
    pub const fn len_utf8(self) -> usize {
        match self.0 {
            0..0x80 => 1,
            0x80..0x800 => 2,
            0x800..0x1_0000 => 3,
            _ => 4,
        }
    }

    /// Encodes the character as UTF-8 into `utf8`, returning the number of
    /// bytes written (1 to 4).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the character is [`Char::EOF`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_utf8(self, utf8: &mut [u8; 4]) -> usize {
        debug_assert!(!self.is_eof(), "EOF has no UTF-8 encoding");
        let ch = self.0;
        match self.len_utf8() {
            1 => {
                utf8[0] = ch as u8;
                1
            }
            2 => {
                utf8[0] = (0xc0 | (ch >> 6)) as u8;
                utf8[1] = (0x80 | (ch & 0x3f)) as u8;
                2
            }
            3 => {
                utf8[0] = (0xe0 | (ch >> 12)) as u8;
                utf8[1] = (0x80 | ((ch >> 6) & 0x3f)) as u8;
                utf8[2] = (0x80 | (ch & 0x3f)) as u8;
                3
            }
            _ => {
                utf8[0] = (0xf0 | ((ch >> 18) & 0x07)) as u8;
                utf8[1] = (0x80 | ((ch >> 12) & 0x3f)) as u8;
                utf8[2] = (0x80 | ((ch >> 6) & 0x3f)) as u8;
                utf8[3] = (0x80 | (ch & 0x3f)) as u8;
                4
            }
        }
    }

    /// Encodes the character as UTF-16 into `utf16`, returning the number of
    /// units written (1 or 2).
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the character is [`Char::EOF`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_utf16(self, utf16: &mut [u16; 2]) -> usize {
        debug_assert!(!self.is_eof(), "EOF has no UTF-16 encoding");
        if self.0 < 0x1_0000 {
            utf16[0] = self.0 as u16;
            1
        } else {
            let v = self.0 - 0x1_0000;
            utf16[0] = (0xd800 | ((v >> 10) & 0x3ff)) as u16;
            utf16[1] = (0xdc00 | (v & 0x3ff)) as u16;
            2
        }
    }

    /// The UTF-32 value. [`Char::EOF`] converts to `u32::MAX`.
    #[must_use]
    pub const fn to_utf32(self) -> u32 {
        self.0
    }
}

impl From<char> for Char {
    fn from(ch: char) -> Self {
        Char(u32::from(ch))
    }
}

impl TryFrom<u32> for Char {
    type Error = u32;

    /// Fails with the rejected value.
    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Char::from_u32(value).ok_or(value)
    }
}

impl PartialEq<char> for Char {
    fn eq(&self, other: &char) -> bool {
        self.0 == u32::from(*other)
    }
}

impl fmt::Debug for Char {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(ch) => write!(f, "{ch:?}"),
            None => f.write_str("EOF"),
        }
    }
}

impl fmt::Display for Char {
    /// Writes the character itself, or `<EOF>` for the sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_char() {
            Some(ch) => fmt::Write::write_char(f, ch),
            None => f.write_str("<EOF>"),
        }
    }
}
