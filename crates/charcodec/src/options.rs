use encoding_rs::{Encoding, IBM866, WINDOWS_1252};

use crate::{Char, decode::MAX_INPUT_CHAR_BYTES};

/// Newline sequence written for each `'\n'` passed to an encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "lowercase"))]
pub enum Newline {
    /// A bare line feed.
    Lf,
    /// Carriage return followed by line feed.
    CrLf,
}

impl Newline {
    /// The host convention: `CrLf` on Windows, `Lf` elsewhere.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) { Newline::CrLf } else { Newline::Lf }
    }
}

impl Default for Newline {
    fn default() -> Self {
        Self::host()
    }
}

/// Configuration shared by converters and encoded streams.
///
/// # Examples
///
/// ```rust
/// use charcodec::{Char, CodecOptions, Newline};
///
/// let options = CodecOptions {
///     error_char: Char::EOF,
///     newline: Newline::CrLf,
///     ..Default::default()
/// };
/// assert_eq!(options.buffer_size, 1024);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CodecOptions {
    /// Substitute returned by input converters in place of malformed input.
    ///
    /// Setting this to [`Char::EOF`] makes decode failures detectable by the
    /// caller, since the sentinel never results from valid input. Batch
    /// helpers drop such substitutes instead of appending them.
    ///
    /// # Default
    ///
    /// `' '`
    pub error_char: Char,

    /// The codepage used for [`CharEncoding::Ansi`](crate::CharEncoding::Ansi)
    /// and [`CharEncoding::Default`](crate::CharEncoding::Default).
    ///
    /// # Default
    ///
    /// `windows-1252`
    pub ansi: &'static Encoding,

    /// The codepage used for [`CharEncoding::Oem`](crate::CharEncoding::Oem).
    ///
    /// # Default
    ///
    /// `IBM866`
    pub oem: &'static Encoding,

    /// Newline sequence written by encoded outputs.
    ///
    /// # Default
    ///
    /// [`Newline::host`]
    pub newline: Newline,

    /// Size in bytes of the lookahead buffer of an encoded input. Values
    /// below `2 * MAX_INPUT_CHAR_BYTES` are raised to that minimum.
    ///
    /// # Default
    ///
    /// `1024`
    pub buffer_size: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            error_char: Char::from_ascii(b' '),
            ansi: WINDOWS_1252,
            oem: IBM866,
            newline: Newline::host(),
            buffer_size: 1024,
        }
    }
}

impl CodecOptions {
    pub(crate) fn effective_buffer_size(&self) -> usize {
        self.buffer_size.max(2 * MAX_INPUT_CHAR_BYTES)
    }
}
