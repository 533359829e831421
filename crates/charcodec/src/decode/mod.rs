//! Input conversion: external bytes to [`Char`]s.
//!
//! Each encoding is decoded by a pure function of the input window returning
//! `(consumed, char)`, where [`Char::EOF`] marks malformed input. The
//! [`InputConverter`] wraps one of them, reports malformed input to its
//! [`ErrorHandler`] and substitutes the configured error character.

mod locale;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use locale::LocaleDecoder;

use crate::{
    Char, CharEncoding, CodecOptions, ConverterError, ErrorHandler, IgnoreErrors, Utf8String,
    error::{ensure_valid, hex_dump},
};

/// Number of bytes which is always enough to hold one encoded character, in
/// every supported encoding.
pub const MAX_INPUT_CHAR_BYTES: usize = 16;

/// Decodes one UTF-8 character.
///
/// # Panics
///
/// Panics if `src` is empty.
#[must_use]
pub fn decode_utf8(src: &[u8]) -> (usize, Char) {
    Char::from_utf8(src)
}

#[inline]
fn unit(pair: [u8; 2], big_endian: bool) -> u16 {
    if big_endian {
        u16::from_be_bytes(pair)
    } else {
        u16::from_le_bytes(pair)
    }
}

/// Decodes one UTF-16 character.
///
/// A lone low surrogate, or a high surrogate followed by something other
/// than a low surrogate, is a malformed unit of 2 bytes. Input ending inside
/// a unit or a surrogate pair is malformed and consumes every remaining byte.
///
/// # Panics
///
/// Panics if `src` is empty.
#[must_use]
pub fn decode_utf16(src: &[u8], big_endian: bool) -> (usize, Char) {
    let &[a, b, ref rest @ ..] = src else {
        assert!(!src.is_empty(), "cannot decode an empty window");
        return (src.len(), Char::EOF);
    };
    let hi = unit([a, b], big_endian);
    if !(0xd800..0xdc00).contains(&hi) {
        return (2, Char::from_utf16(&[hi]).1);
    }
    let &[c, d, ..] = rest else {
        return (src.len(), Char::EOF);
    };
    match Char::from_utf16(&[hi, unit([c, d], big_endian)]) {
        (2, ch) => (4, ch),
        _ => (2, Char::EOF),
    }
}

/// Decodes one UTF-32 character. Fewer than 4 bytes is malformed input
/// consuming all of them.
///
/// # Panics
///
/// Panics if `src` is empty.
#[must_use]
pub fn decode_utf32(src: &[u8], big_endian: bool) -> (usize, Char) {
    let &[a, b, c, d, ..] = src else {
        assert!(!src.is_empty(), "cannot decode an empty window");
        return (src.len(), Char::EOF);
    };
    let value = if big_endian {
        u32::from_be_bytes([a, b, c, d])
    } else {
        u32::from_le_bytes([a, b, c, d])
    };
    (4, Char::from_utf32(value))
}

/// The decoder for one concrete encoding.
#[derive(Debug, Clone)]
pub enum Decoder {
    /// UTF-8.
    Utf8,
    /// UTF-16 in either byte order.
    Utf16 {
        /// Whether the most significant byte comes first.
        big_endian: bool,
    },
    /// UTF-32 in either byte order.
    Utf32 {
        /// Whether the most significant byte comes first.
        big_endian: bool,
    },
    /// A legacy codepage.
    Locale(Arc<LocaleDecoder>),
}

impl Decoder {
    /// The decoder for `encoding`, with codepages taken from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn new(encoding: CharEncoding, options: &CodecOptions) -> Result<Self, ConverterError> {
        Ok(match ensure_valid(encoding)? {
            CharEncoding::Utf8 => Self::Utf8,
            CharEncoding::Utf16Be => Self::Utf16 { big_endian: true },
            CharEncoding::Utf16Le => Self::Utf16 { big_endian: false },
            CharEncoding::Utf32Be => Self::Utf32 { big_endian: true },
            CharEncoding::Utf32Le => Self::Utf32 { big_endian: false },
            CharEncoding::Oem => Self::Locale(LocaleDecoder::shared(options.oem)),
            CharEncoding::Ansi | CharEncoding::Default | CharEncoding::Invalid => {
                Self::Locale(LocaleDecoder::shared(options.ansi))
            }
        })
    }

    /// Decodes one character from the front of `src`. Malformed input gives
    /// [`Char::EOF`] together with the length of the malformed unit, which is
    /// never zero.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty.
    #[must_use]
    pub fn decode(&self, src: &[u8]) -> (usize, Char) {
        match self {
            Self::Utf8 => decode_utf8(src),
            Self::Utf16 { big_endian } => decode_utf16(src, *big_endian),
            Self::Utf32 { big_endian } => decode_utf32(src, *big_endian),
            Self::Locale(locale) => locale.decode(src),
        }
    }
}

/// Converts bytes in one encoding to [`Char`]s, reporting malformed input.
///
/// # Examples
///
/// ```rust
/// use charcodec::{Char, CharEncoding, CodecOptions, IgnoreErrors, InputConverter};
///
/// let converter =
///     InputConverter::new(CharEncoding::Utf16Be, &CodecOptions::default(), IgnoreErrors)
///         .unwrap();
/// assert_eq!(converter.convert_char(&[0x20, 0xac]), (2, Char::from('€')));
/// ```
#[derive(Debug)]
pub struct InputConverter<H = IgnoreErrors> {
    decoder: Decoder,
    encoding: CharEncoding,
    options: CodecOptions,
    handler: H,
    line: u32,
}

impl<H: ErrorHandler> InputConverter<H> {
    /// Binds a converter to `encoding`. [`CharEncoding::Default`] is resolved
    /// here.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn new(
        encoding: CharEncoding,
        options: &CodecOptions,
        handler: H,
    ) -> Result<Self, ConverterError> {
        let encoding = ensure_valid(encoding)?;
        Ok(Self {
            decoder: Decoder::new(encoding, options)?,
            encoding,
            options: *options,
            handler,
            line: 1,
        })
    }

    /// Rebinds the converter to another encoding, as after reading a BOM.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`], leaving the converter unchanged.
    pub fn set_encoding(&mut self, encoding: CharEncoding) -> Result<(), ConverterError> {
        let encoding = ensure_valid(encoding)?;
        self.decoder = Decoder::new(encoding, &self.options)?;
        self.encoding = encoding;
        Ok(())
    }

    /// The concrete encoding being decoded.
    #[must_use]
    pub fn encoding(&self) -> CharEncoding {
        self.encoding
    }

    /// The line number attached to decode error reports.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Sets the line number attached to subsequent decode error reports.
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
    }

    /// The error handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Consumes the converter, returning its error handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Decodes one character from the front of `src`.
    ///
    /// Malformed input is reported with a hex dump of the offending bytes
    /// and replaced by the configured error character. The consumed length
    /// is between 1 and `src.len()`; an empty `src` gives `(0, Char::EOF)`.
    #[must_use]
    pub fn convert_char(&self, src: &[u8]) -> (usize, Char) {
        if src.is_empty() {
            return (0, Char::EOF);
        }
        let (len, ch) = self.decoder.decode(src);
        if !ch.is_eof() {
            return (len, ch);
        }
        let len = len.clamp(1, src.len());
        self.handler
            .cannot_decode_input(self.line, &hex_dump(&src[..len]));
        (len, self.options.error_char)
    }

    /// Decodes all of `bytes` and appends the result to `out`. A sequence cut
    /// off by the end of `bytes` is malformed. Error characters equal to
    /// [`Char::EOF`] are dropped.
    pub fn convert_append(&self, bytes: &[u8], out: &mut Utf8String) {
        let mut pos = 0;
        while pos < bytes.len() {
            let (len, ch) = self.convert_char(&bytes[pos..]);
            pos += len;
            if !ch.is_eof() {
                out.push(ch);
            }
        }
    }

    /// Decodes all of `bytes` into a new string.
    #[must_use]
    pub fn convert_string(&self, bytes: &[u8]) -> Utf8String {
        let mut out = Utf8String::with_capacity(bytes.len());
        self.convert_append(bytes, &mut out);
        out
    }
}
