use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

/// A source of raw bytes.
///
/// `read` returning 0 while `failed` is false means the source is
/// exhausted.
pub trait RawInput {
    /// Reads up to `buf.len()` bytes, returning how many were read.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Whether a read has failed. Failure is permanent.
    fn failed(&self) -> bool;
}

/// A sink for raw bytes.
pub trait RawOutput {
    /// Writes all of `buf`, or marks the sink failed.
    fn write(&mut self, buf: &[u8]);

    /// Flushes and closes the sink.
    fn close(&mut self);

    /// Whether a write or close has failed. Failure is permanent.
    fn failed(&self) -> bool;
}

impl<T: RawInput + ?Sized> RawInput for &mut T {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }
}

impl<T: RawOutput + ?Sized> RawOutput for &mut T {
    fn write(&mut self, buf: &[u8]) {
        (**self).write(buf);
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn failed(&self) -> bool {
        (**self).failed()
    }
}

/// An in-memory sink which never fails.
impl RawOutput for Vec<u8> {
    fn write(&mut self, buf: &[u8]) {
        self.extend_from_slice(buf);
    }

    fn close(&mut self) {}

    fn failed(&self) -> bool {
        false
    }
}

/// A [`RawInput`] over any [`Read`].
///
/// Reads fill the whole buffer unless the reader is exhausted, retrying
/// interrupted reads.
#[derive(Debug)]
pub struct IoInput<R> {
    inner: Option<R>,
    failed: bool,
}

impl<R: Read> IoInput<R> {
    /// Wraps a reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner: Some(inner),
            failed: false,
        }
    }

    /// An input which has already failed, standing in for a source that
    /// could not be opened.
    #[must_use]
    pub fn unopened() -> Self {
        Self {
            inner: None,
            failed: true,
        }
    }

    /// The wrapped reader, unless it was never opened.
    pub fn into_inner(self) -> Option<R> {
        self.inner
    }
}

impl IoInput<File> {
    /// Opens `path` for reading.
    ///
    /// # Errors
    ///
    /// Returns the error from [`File::open`].
    pub fn open(path: &Path) -> io::Result<Self> {
        File::open(path).map(Self::new)
    }
}

impl<R: Read> RawInput for IoInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> usize {
        if self.failed {
            return 0;
        }
        let Some(inner) = self.inner.as_mut() else {
            return 0;
        };
        let mut filled = 0;
        while filled < buf.len() {
            match inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    tracing::debug!(error = %err, "raw read failed");
                    self.failed = true;
                    break;
                }
            }
        }
        filled
    }

    fn failed(&self) -> bool {
        self.failed
    }
}

/// A [`RawOutput`] over any [`Write`].
#[derive(Debug)]
pub struct IoOutput<W> {
    inner: Option<W>,
    failed: bool,
}

impl<W: Write> IoOutput<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            failed: false,
        }
    }

    /// An output which has already failed, standing in for a destination
    /// that could not be created.
    #[must_use]
    pub fn unopened() -> Self {
        Self {
            inner: None,
            failed: true,
        }
    }

    /// The wrapped writer, unless it was never opened.
    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// The wrapped writer, unless it was never opened.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }

    fn check(&mut self, result: io::Result<()>, op: &'static str) {
        if let Err(err) = result {
            tracing::debug!(error = %err, op, "raw write failed");
            self.failed = true;
        }
    }
}

impl IoOutput<File> {
    /// Creates or truncates `path` for writing.
    ///
    /// # Errors
    ///
    /// Returns the error from [`File::create`].
    pub fn create(path: &Path) -> io::Result<Self> {
        File::create(path).map(Self::new)
    }
}

impl<W: Write> RawOutput for IoOutput<W> {
    fn write(&mut self, buf: &[u8]) {
        if self.failed {
            return;
        }
        if let Some(inner) = self.inner.as_mut() {
            let result = inner.write_all(buf);
            self.check(result, "write");
        }
    }

    fn close(&mut self) {
        if self.failed {
            return;
        }
        if let Some(inner) = self.inner.as_mut() {
            let result = inner.flush();
            self.check(result, "flush");
        }
    }

    fn failed(&self) -> bool {
        self.failed
    }
}
