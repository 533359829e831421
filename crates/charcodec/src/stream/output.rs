use core::fmt;
use std::{
    fs::File,
    path::{Path, PathBuf},
};

use super::raw::{IoOutput, RawOutput};
use crate::{
    Char, CharEncoding, CharSink, CodecOptions, ConverterError, ErrorHandler, IgnoreErrors,
    Newline, OutputConverter, Utf8String, encode::MAX_OUTPUT_CHAR_BYTES,
};

/// A character writer over an encoded byte sink.
///
/// Each `'\n'` is written as the configured [`Newline`] sequence.
/// Characters the encoding cannot represent are reported and skipped. Once
/// the sink fails the failure is reported and further writes do nothing.
/// The sink is closed by [`EncodedOutput::close`] or on drop.
///
/// # Examples
///
/// ```rust
/// use charcodec::{CharEncoding, CharSink, CodecOptions, EncodedOutput, IgnoreErrors, Newline};
///
/// let mut bytes = Vec::new();
/// let options = CodecOptions {
///     newline: Newline::CrLf,
///     ..Default::default()
/// };
/// let mut out =
///     EncodedOutput::from_raw(&mut bytes, "memory", CharEncoding::Utf8, &options, IgnoreErrors)
///         .unwrap();
/// out.put_str("a\nb");
/// drop(out);
/// assert_eq!(bytes, b"a\r\nb");
/// ```
#[derive(Debug)]
pub struct EncodedOutput<W: RawOutput, H: ErrorHandler = IgnoreErrors> {
    raw: W,
    path: PathBuf,
    converter: OutputConverter<H>,
    newline: Newline,
    encoding_error: bool,
    write_error: bool,
    closed: bool,
}

impl<H: ErrorHandler> EncodedOutput<IoOutput<File>, H> {
    /// Creates or truncates the file at `path`.
    ///
    /// A file that cannot be created is reported to `handler` and gives a
    /// writer which discards everything.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn create(
        path: impl AsRef<Path>,
        encoding: CharEncoding,
        options: &CodecOptions,
        handler: H,
    ) -> Result<Self, ConverterError> {
        let path = path.as_ref();
        let converter = OutputConverter::new(encoding, options, handler)?;
        let raw = IoOutput::create(path).unwrap_or_else(|err| {
            tracing::debug!(path = %path.display(), error = %err, "cannot create output");
            converter.handler().cannot_open_for_write(path);
            IoOutput::unopened()
        });
        let mut output = Self::with_converter(raw, path.to_owned(), converter, options);
        // an unopened file has been reported already
        output.write_error = output.raw.failed();
        Ok(output)
    }
}

impl<W: RawOutput, H: ErrorHandler> EncodedOutput<W, H> {
    /// Writes to `raw`. `path` names the sink in error reports. A sink that
    /// has already failed is reported here.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn from_raw(
        raw: W,
        path: impl Into<PathBuf>,
        encoding: CharEncoding,
        options: &CodecOptions,
        handler: H,
    ) -> Result<Self, ConverterError> {
        let converter = OutputConverter::new(encoding, options, handler)?;
        let mut output = Self::with_converter(raw, path.into(), converter, options);
        output.check_raw();
        Ok(output)
    }

    fn with_converter(
        raw: W,
        path: PathBuf,
        converter: OutputConverter<H>,
        options: &CodecOptions,
    ) -> Self {
        tracing::debug!(
            path = %path.display(),
            encoding = %converter.encoding(),
            newline = ?options.newline,
            "created encoded output"
        );
        Self {
            raw,
            path,
            converter,
            newline: options.newline,
            encoding_error: false,
            write_error: false,
            closed: false,
        }
    }

    fn check_raw(&mut self) {
        if self.raw.failed() && !self.write_error {
            self.write_error = true;
            self.converter.handler().write_error(&self.path);
        }
    }

    fn put(&mut self, ch: Char) {
        let mut buf = [0u8; MAX_OUTPUT_CHAR_BYTES];
        let len = self.converter.convert_char(ch, &mut buf);
        if len == 0 {
            self.encoding_error = true;
            return;
        }
        self.raw.write(&buf[..len]);
        self.check_raw();
    }

    /// Writes one character, expanding `'\n'` to the newline sequence.
    pub fn write(&mut self, ch: Char) {
        if self.closed || self.raw.failed() {
            return;
        }
        if ch == '\n' && self.newline == Newline::CrLf {
            self.put(Char::from('\r'));
            if self.raw.failed() {
                return;
            }
        }
        self.put(ch);
    }

    /// Writes every character of `s`.
    pub fn write_string(&mut self, s: &Utf8String) {
        for ch in s {
            self.write(ch);
        }
    }

    /// Closes the sink. Later calls, and later writes, do nothing.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if !self.raw.failed() {
            self.raw.close();
            self.check_raw();
        }
        tracing::debug!(
            path = %self.path.display(),
            errors = self.has_reported_errors(),
            "closed encoded output"
        );
    }

    /// Whether an encoding or sink error has been reported.
    #[must_use]
    pub fn has_reported_errors(&self) -> bool {
        self.encoding_error || self.write_error
    }

    /// The encoding being written.
    #[must_use]
    pub fn encoding(&self) -> CharEncoding {
        self.converter.encoding()
    }

    /// The name of the sink used in error reports.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        self.converter.handler()
    }

    /// The sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.raw
    }
}

impl<W: RawOutput, H: ErrorHandler> Drop for EncodedOutput<W, H> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<W: RawOutput, H: ErrorHandler> CharSink for EncodedOutput<W, H> {
    fn put_char(&mut self, ch: Char) {
        if !ch.is_eof() {
            self.write(ch);
        }
    }
}

impl<W: RawOutput, H: ErrorHandler> fmt::Write for EncodedOutput<W, H> {
    /// Fails once the sink has failed; unencodable characters do not fail.
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.put_str(s);
        if self.write_error {
            Err(fmt::Error)
        } else {
            Ok(())
        }
    }
}
