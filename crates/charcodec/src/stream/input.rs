use std::{
    fs::File,
    path::{Path, PathBuf},
};

use super::raw::{IoInput, RawInput};
use crate::{
    Char, CharEncoding, CodecOptions, ConverterError, ErrorHandler, IgnoreErrors, InputConverter,
    Utf8String, decode::MAX_INPUT_CHAR_BYTES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Streaming,
    Eof,
    Failed,
}

/// A character reader over an encoded byte source.
///
/// On construction the first buffer of input is checked for a byte order
/// mark, which overrides the requested encoding and is skipped. Reading
/// then yields one [`Char`] at a time with newlines normalized: each of
/// `"\r\n"`, `"\n\r"`, `"\r"` and `"\n"` reads as a single `'\n'` and ends
/// one line. Malformed input is reported with the current line number and
/// replaced by [`CodecOptions::error_char`].
///
/// A failed source is reported once and leaves the reader permanently at end
/// of input, discarding anything still buffered.
///
/// # Examples
///
/// ```rust
/// use charcodec::{CharEncoding, CodecOptions, EncodedInput, IgnoreErrors, IoInput};
///
/// let bytes: &[u8] = b"\xef\xbb\xbfone\r\ntwo";
/// let mut input = EncodedInput::from_raw(
///     IoInput::new(bytes),
///     "memory",
///     CharEncoding::Ansi,
///     &CodecOptions::default(),
///     IgnoreErrors,
/// )
/// .unwrap();
/// assert_eq!(input.encoding(), CharEncoding::Utf8);
/// assert_eq!(input.read_string(usize::MAX).as_str(), "one\ntwo");
/// assert_eq!(input.line(), 2);
/// ```
#[derive(Debug)]
pub struct EncodedInput<R, H = IgnoreErrors> {
    raw: R,
    path: PathBuf,
    converter: InputConverter<H>,
    buf: Box<[u8]>,
    pos: usize,
    size: usize,
    exhausted: bool,
    state: State,
    pending: Option<Char>,
    line: u32,
}

impl<H: ErrorHandler> EncodedInput<IoInput<File>, H> {
    /// Opens the file at `path`.
    ///
    /// A file that cannot be opened is reported to `handler` and gives a
    /// reader which is already at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn open(
        path: impl AsRef<Path>,
        encoding: CharEncoding,
        options: &CodecOptions,
        handler: H,
    ) -> Result<Self, ConverterError> {
        let path = path.as_ref();
        let converter = InputConverter::new(encoding, options, handler)?;
        let raw = IoInput::open(path).unwrap_or_else(|err| {
            tracing::debug!(path = %path.display(), error = %err, "cannot open input");
            converter.handler().cannot_open_for_read(path);
            IoInput::unopened()
        });
        Ok(Self::with_converter(raw, path.to_owned(), converter, options))
    }
}

impl<R: RawInput, H: ErrorHandler> EncodedInput<R, H> {
    /// Reads from `raw`. `path` names the source in error reports.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidEncoding`] for
    /// [`CharEncoding::Invalid`].
    pub fn from_raw(
        raw: R,
        path: impl Into<PathBuf>,
        encoding: CharEncoding,
        options: &CodecOptions,
        handler: H,
    ) -> Result<Self, ConverterError> {
        let converter = InputConverter::new(encoding, options, handler)?;
        Ok(Self::with_converter(raw, path.into(), converter, options))
    }

    fn with_converter(
        raw: R,
        path: PathBuf,
        converter: InputConverter<H>,
        options: &CodecOptions,
    ) -> Self {
        let mut input = Self {
            raw,
            path,
            converter,
            buf: vec![0; options.effective_buffer_size()].into_boxed_slice(),
            pos: 0,
            size: 0,
            exhausted: false,
            state: State::Streaming,
            pending: None,
            line: 1,
        };
        input.sniff();
        input
    }

    fn sniff(&mut self) {
        let requested = self.converter.encoding();
        if self.raw.failed() {
            // never opened, already reported
            self.state = State::Failed;
            return;
        }
        self.refill();
        let mut bom = 0;
        if let Some((encoding, len)) = CharEncoding::sniff_bom(&self.buf[..self.size]) {
            if self.converter.set_encoding(encoding).is_ok() {
                self.pos = len;
                bom = len;
            }
        }
        tracing::debug!(
            path = %self.path.display(),
            requested = %requested,
            detected = %self.converter.encoding(),
            bom,
            "opened encoded input"
        );
    }

    /// Moves the unread bytes to the front of the buffer and fills the rest
    /// from the source. A failed source is reported and fails the reader.
    fn refill(&mut self) {
        if self.exhausted {
            return;
        }
        self.buf.copy_within(self.pos..self.size, 0);
        self.size -= self.pos;
        self.pos = 0;
        while self.size < self.buf.len() {
            let read = self.raw.read(&mut self.buf[self.size..]);
            self.size += read;
            if self.raw.failed() {
                self.converter.handler().read_error(&self.path);
                self.exhausted = true;
                self.state = State::Failed;
                self.pending = None;
                return;
            }
            if read == 0 {
                self.exhausted = true;
                return;
            }
        }
    }

    fn finish(&mut self) {
        self.state = State::Eof;
        self.pending = None;
        tracing::trace!(path = %self.path.display(), line = self.line, "end of encoded input");
    }

    /// Reads the next character, or [`Char::EOF`] at the end of input.
    ///
    /// With [`CodecOptions::error_char`] set to [`Char::EOF`], malformed
    /// input also reads as [`Char::EOF`]; [`EncodedInput::is_eof`] tells the
    /// two apart.
    pub fn read(&mut self) -> Char {
        if self.state != State::Streaming {
            return Char::EOF;
        }
        // the line only advances once a character follows the newline
        let new_line = self.pending.is_some();
        if new_line {
            self.converter.set_line(self.line.saturating_add(1));
        }
        loop {
            if self.size - self.pos < MAX_INPUT_CHAR_BYTES {
                self.refill();
                if self.state == State::Failed {
                    return Char::EOF;
                }
            }
            if self.pos == self.size {
                self.finish();
                return Char::EOF;
            }
            let (len, ch) = self.converter.convert_char(&self.buf[self.pos..self.size]);
            self.pos += len;

            // the second half of a two character newline
            let pending = self.pending.take();
            if (pending == Some(Char::from('\r')) && ch == '\n')
                || (pending == Some(Char::from('\n')) && ch == '\r')
            {
                continue;
            }

            if new_line {
                self.line = self.line.saturating_add(1);
            }

            if ch == '\r' || ch == '\n' {
                self.pending = Some(ch);
                return Char::from('\n');
            }
            return ch;
        }
    }

    /// Reads up to `max` characters onto `out`, stopping early at the end of
    /// input. Returns the number of characters read.
    pub fn read_into(&mut self, out: &mut Utf8String, max: usize) -> usize {
        let mut count = 0;
        while count < max {
            let ch = self.read();
            if ch.is_eof() {
                if self.is_eof() {
                    break;
                }
                continue;
            }
            out.push(ch);
            count += 1;
        }
        count
    }

    /// Reads up to `max` characters into a new string.
    pub fn read_string(&mut self, max: usize) -> Utf8String {
        let mut out = Utf8String::new();
        self.read_into(&mut out, max);
        out
    }

    /// Whether the end of input has been reached, or the source failed.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.state != State::Streaming
    }

    /// Whether reading the source failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.state == State::Failed
    }

    /// The line of the character read last, starting at 1.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Renumbers the current line, as when reading resumes part way into a
    /// file. Decode errors are reported against the new numbering.
    pub fn set_line(&mut self, line: u32) {
        self.line = line;
        self.converter.set_line(line);
    }

    /// The encoding being read, after BOM detection.
    #[must_use]
    pub fn encoding(&self) -> CharEncoding {
        self.converter.encoding()
    }

    /// The name of the source used in error reports.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error handler.
    #[must_use]
    pub fn handler(&self) -> &H {
        self.converter.handler()
    }
}

impl<R: RawInput, H: ErrorHandler> Iterator for EncodedInput<R, H> {
    type Item = Char;

    /// Yields characters until the end of input. Malformed input read as
    /// [`Char::EOF`] is skipped.
    fn next(&mut self) -> Option<Char> {
        loop {
            let ch = self.read();
            if !ch.is_eof() {
                return Some(ch);
            }
            if self.is_eof() {
                return None;
            }
        }
    }
}
