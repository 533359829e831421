//! Output conversion: [`Char`]s to external bytes.
//!
//! The per-encoding functions expect a character other than [`Char::EOF`];
//! [`Encoder::encode`] and the converter check for it.


use encoding_rs::{EncoderResult, Encoding};

use crate::{
    Char, CharEncoding, CodecOptions, ConverterError, ErrorHandler, IgnoreErrors, Utf8String,
    error::ensure_valid,
};

/// Number of bytes which is always enough to hold one encoded character, in
/// every supported encoding.
pub const MAX_OUTPUT_CHAR_BYTES: usize = 16;

/// Output buffer for one encoded character.
pub type CharBytes = [u8; MAX_OUTPUT_CHAR_BYTES];

/// Encodes `ch` as UTF-8, returning the number of bytes written.
pub fn encode_utf8(ch: Char, dst: &mut CharBytes) -> usize {
    let mut buf = [0u8; 4];
    let len = ch.to_utf8(&mut buf);
    dst[..len].copy_from_slice(&buf[..len]);
    len
}

/// Encodes `ch` as UTF-16, returning the number of bytes written.
pub fn encode_utf16(ch: Char, big_endian: bool, dst: &mut CharBytes) -> usize {
    let mut units = [0u16; 2];
    let n = ch.to_utf16(&mut units);
    for (unit, out) in units[..n].iter().zip(dst.chunks_exact_mut(2)) {
        out.copy_from_slice(&if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        });
    }
    n * 2
}

/// Encodes `ch` as UTF-32, returning the number of bytes written.
pub fn encode_utf32(ch: Char, big_endian: bool, dst: &mut CharBytes) -> usize {
    let value = ch.to_utf32();
    dst[..4].copy_from_slice(&if big_endian {
        value.to_be_bytes()
    } else {
        value.to_le_bytes()
    });
    4
}

/// Encodes `ch` in a legacy codepage, returning the number of bytes
/// written, or 0 if the codepage has no representation for it.
pub fn encode_locale(encoding: &'static Encoding, ch: Char, dst: &mut CharBytes) -> usize {
    let mut units = [0u16; 2];
    let n = ch.to_utf16(&mut units);
    let mut encoder = encoding.new_encoder();
    let (result, _, written) = encoder.encode_from_utf16_without_replacement(&units[..n], dst, true);
    match result {
        EncoderResult::InputEmpty => written,
        EncoderResult::OutputFull | EncoderResult::Unmappable(_) => 0,
    }
}

/// The encoder for one concrete encoding.
#[derive(Debug, Clone, Copy)]
pub enum Encoder {
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
    Locale(&'static Encoding),
}

impl Encoder {
    /// The encoder for `encoding`, with codepages taken from `options`.
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
            CharEncoding::Oem => Self::Locale(options.oem),
            CharEncoding::Ansi | CharEncoding::Default | CharEncoding::Invalid => {
                Self::Locale(options.ansi)
            }
        })
    }

    /// Encodes one character, returning the number of bytes written or 0 if
    /// it cannot be represented. [`Char::EOF`] is never representable.
    pub fn encode(self, ch: Char, dst: &mut CharBytes) -> usize {
        if ch.is_eof() {
            return 0;
        }
        match self {
            Self::Utf8 => encode_utf8(ch, dst),
            Self::Utf16 { big_endian } => encode_utf16(ch, big_endian, dst),
            Self::Utf32 { big_endian } => encode_utf32(ch, big_endian, dst),
            Self::Locale(encoding) => encode_locale(encoding, ch, dst),
        }
    }
}

/// Converts [`Char`]s to bytes in one encoding, reporting characters the
/// encoding cannot represent.
///
/// # Examples
///
/// ```rust
/// use charcodec::{Char, CharEncoding, CodecOptions, IgnoreErrors, OutputConverter};
///
/// let converter =
///     OutputConverter::new(CharEncoding::Ansi, &CodecOptions::default(), IgnoreErrors)
///         .unwrap();
/// let mut buf = [0u8; charcodec::MAX_OUTPUT_CHAR_BYTES];
/// assert_eq!(converter.convert_char(Char::from('€'), &mut buf), 1);
/// assert_eq!(buf[0], 0x80);
/// assert_eq!(converter.convert_char(Char::from('\u{1d11e}'), &mut buf), 0);
/// ```
#[derive(Debug)]
pub struct OutputConverter<H = IgnoreErrors> {
    encoder: Encoder,
    encoding: CharEncoding,
    handler: H,
}

impl<H: ErrorHandler> OutputConverter<H> {
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
            encoder: Encoder::new(encoding, options)?,
            encoding,
            handler,
        })
    }

    /// The concrete encoding being written.
    #[must_use]
    pub fn encoding(&self) -> CharEncoding {
        self.encoding
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

    /// Encodes one character into `dst`, returning the number of bytes
    /// written. A character the encoding cannot represent is reported and
    /// gives 0.
    pub fn convert_char(&self, ch: Char, dst: &mut CharBytes) -> usize {
        let len = self.encoder.encode(ch, dst);
        if len == 0 {
            self.handler.cannot_encode_output(ch);
        }
        len
    }

    /// Encodes every character of `s` onto `out`, skipping characters that
    /// cannot be represented. Returns whether every character was encoded.
    pub fn convert_append(&self, s: &Utf8String, out: &mut Vec<u8>) -> bool {
        let mut buf = [0u8; MAX_OUTPUT_CHAR_BYTES];
        let mut ok = true;
        out.reserve(s.byte_len());
        for ch in s {
            let len = self.convert_char(ch, &mut buf);
            ok &= len != 0;
            out.extend_from_slice(&buf[..len]);
        }
        ok
    }

    /// Encodes `s`, or gives `None` if any character cannot be represented.
    #[must_use]
    pub fn convert_string(&self, s: &Utf8String) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.convert_append(s, &mut out).then_some(out)
    }
}
