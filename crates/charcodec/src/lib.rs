//! Character encoding conversion and line-oriented encoded file streams.
//!
//! Text is held internally as [`Utf8String`] and processed one [`Char`] at a
//! time. [`InputConverter`] and [`OutputConverter`] translate between bytes
//! and characters in any [`CharEncoding`]: the Unicode forms, plus the
//! configured ANSI and OEM codepages. [`EncodedInput`] and [`EncodedOutput`]
//! wrap byte sources and sinks with BOM detection, newline normalization and
//! line counting.
//!
//! Nothing here fails on bad data. Malformed input, unrepresentable
//! characters and I/O failures go to an [`ErrorHandler`] and processing
//! carries on.
//!
//! ```rust
//! use charcodec::{CharEncoding, CodecOptions, CollectErrors, EncodedInput, IoInput};
//!
//! let errors = CollectErrors::default();
//! let bytes: &[u8] = b"caf\xe9\r\n\x81";
//! let mut input = EncodedInput::from_raw(
//!     IoInput::new(bytes),
//!     "menu.txt",
//!     CharEncoding::Utf8,
//!     &CodecOptions::default(),
//!     &errors,
//! )
//! .unwrap();
//! assert_eq!(input.read_string(usize::MAX).as_str(), "caf \n ");
//! assert_eq!(errors.reports().len(), 2);
//! ```

mod char;
mod decode;
mod encode;
mod encoding;
mod error;
mod options;
mod report;
mod stream;
mod string;

pub use char::Char;
pub use decode::{
    Decoder, InputConverter, LocaleDecoder, MAX_INPUT_CHAR_BYTES, decode_utf8, decode_utf16,
    decode_utf32,
};
pub use encode::{
    CharBytes, Encoder, MAX_OUTPUT_CHAR_BYTES, OutputConverter, encode_locale, encode_utf8,
    encode_utf16, encode_utf32,
};
pub use encoding::CharEncoding;
pub use error::{ConverterError, FileError, InvalidUtf8, ParseEncodingError};
pub use options::{CodecOptions, Newline};
pub use report::{CollectErrors, ErrorHandler, IgnoreErrors, TraceErrors};
pub use stream::{EncodedInput, EncodedOutput, IoInput, IoOutput, RawInput, RawOutput};
pub use string::{CharSink, Chars, StringIter, StringIterPair, Utf8String};

/// Re-exported so callers can name codepages for [`CodecOptions`].
pub use encoding_rs;
