//! Error reporting for converters and encoded streams.
//!
//! Conversion never fails outright. Problems are handed to an
//! [`ErrorHandler`] owned by the converter or stream, and processing
//! continues. Pass a reference (or an `Rc`/`Arc`) to keep access to a
//! handler after giving it to a stream:
//!
//! ```rust
//! use charcodec::{CharEncoding, CodecOptions, CollectErrors, InputConverter};
//!
//! let errors = CollectErrors::default();
//! let converter =
//!     InputConverter::new(CharEncoding::Utf8, &CodecOptions::default(), &errors).unwrap();
//! let text = converter.convert_string(b"ok\xff");
//! assert_eq!(text.as_str(), "ok ");
//! assert_eq!(errors.reports().len(), 1);
//! ```

use std::{cell::RefCell, path::Path, rc::Rc, sync::Arc};

use crate::{Char, error::FileError};

/// Receives the conditions of [`FileError`] as they happen.
///
/// Every method has a default. Implementing only [`ErrorHandler::report`]
/// sees all conditions as [`FileError`] values; the named callbacks can be
/// overridden individually instead.
pub trait ErrorHandler {
    /// Called for every condition the named callbacks do not intercept.
    fn report(&self, error: FileError) {
        let _ = error;
    }

    /// Malformed input on `line`, rendered as a hex dump of its bytes.
    fn cannot_decode_input(&self, line: u32, bytes: &str) {
        self.report(FileError::CannotDecode {
            line,
            bytes: bytes.to_owned(),
        });
    }

    /// A character the output encoding cannot represent.
    fn cannot_encode_output(&self, ch: Char) {
        self.report(FileError::CannotEncode { ch });
    }

    /// Opening `path` for reading failed.
    fn cannot_open_for_read(&self, path: &Path) {
        self.report(FileError::CannotOpenForRead {
            path: path.to_owned(),
        });
    }

    /// Reading from `path` failed.
    fn read_error(&self, path: &Path) {
        self.report(FileError::ReadError {
            path: path.to_owned(),
        });
    }

    /// Creating `path` for writing failed.
    fn cannot_open_for_write(&self, path: &Path) {
        self.report(FileError::CannotOpenForWrite {
            path: path.to_owned(),
        });
    }

    /// Writing to `path` failed.
    fn write_error(&self, path: &Path) {
        self.report(FileError::WriteError {
            path: path.to_owned(),
        });
    }
}

macro_rules! forward_handler {
    ($($ty:ty),*) => {$(
        impl<T: ErrorHandler + ?Sized> ErrorHandler for $ty {
            fn report(&self, error: FileError) {
                (**self).report(error);
            }
            fn cannot_decode_input(&self, line: u32, bytes: &str) {
                (**self).cannot_decode_input(line, bytes);
            }
            fn cannot_encode_output(&self, ch: Char) {
                (**self).cannot_encode_output(ch);
            }
            fn cannot_open_for_read(&self, path: &Path) {
                (**self).cannot_open_for_read(path);
            }
            fn read_error(&self, path: &Path) {
                (**self).read_error(path);
            }
            fn cannot_open_for_write(&self, path: &Path) {
                (**self).cannot_open_for_write(path);
            }
            fn write_error(&self, path: &Path) {
                (**self).write_error(path);
            }
        }
    )*};
}

forward_handler!(&T, Box<T>, Rc<T>, Arc<T>);

/// Silently discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreErrors;

impl ErrorHandler for IgnoreErrors {}

/// Records every report in order.
#[derive(Debug, Default)]
pub struct CollectErrors {
    reports: RefCell<Vec<FileError>>,
}

impl CollectErrors {
    /// A snapshot of the reports so far.
    #[must_use]
    pub fn reports(&self) -> Vec<FileError> {
        self.reports.borrow().clone()
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    /// Removes and returns the reports so far.
    pub fn take(&self) -> Vec<FileError> {
        self.reports.take()
    }

    /// Consumes the collector, returning its reports.
    #[must_use]
    pub fn into_reports(self) -> Vec<FileError> {
        self.reports.into_inner()
    }
}

impl ErrorHandler for CollectErrors {
    fn report(&self, error: FileError) {
        self.reports.borrow_mut().push(error);
    }
}

/// Emits every report as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceErrors;

impl ErrorHandler for TraceErrors {
    fn report(&self, error: FileError) {
        match &error {
            FileError::CannotDecode { line, bytes } => {
                tracing::warn!(line, bytes = %bytes, "{error}");
            }
            FileError::CannotEncode { ch } => {
                tracing::warn!(ch = ?ch, "{error}");
            }
            FileError::CannotOpenForRead { path }
            | FileError::ReadError { path }
            | FileError::CannotOpenForWrite { path }
            | FileError::WriteError { path } => {
                tracing::warn!(path = %path.display(), "{error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[derive(Default)]
    struct CountDecodes(RefCell<u32>);

    impl ErrorHandler for CountDecodes {
        fn cannot_decode_input(&self, _line: u32, _bytes: &str) {
            *self.0.borrow_mut() += 1;
        }
    }

    #[test]
    fn named_callbacks_build_file_errors() {
        let errors = CollectErrors::default();
        errors.cannot_decode_input(7, "0xff");
        errors.cannot_encode_output(Char::from('€'));
        errors.read_error(Path::new("in.txt"));
        assert_eq!(
            errors.take(),
            vec![
                FileError::CannotDecode {
                    line: 7,
                    bytes: "0xff".into()
                },
                FileError::CannotEncode {
                    ch: Char::from('€')
                },
                FileError::ReadError {
                    path: PathBuf::from("in.txt")
                },
            ]
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn overriding_one_callback_leaves_others_on_report() {
        let handler = CountDecodes::default();
        let shared = Rc::new(handler);
        shared.cannot_decode_input(1, "0x80");
        shared.write_error(Path::new("ignored"));
        assert_eq!(*shared.0.borrow(), 1);
    }

    #[test]
    fn forwarding_through_references() {
        let errors = CollectErrors::default();
        let boxed: Box<dyn ErrorHandler + '_> = Box::new(&errors);
        boxed.cannot_open_for_write(Path::new("out"));
        drop(boxed);
        assert_eq!(
            errors.into_reports(),
            vec![FileError::CannotOpenForWrite {
                path: PathBuf::from("out")
            }]
        );
    }

    #[test]
    fn trace_errors_does_not_panic_without_subscriber() {
        TraceErrors.cannot_decode_input(1, "0x80");
        TraceErrors.cannot_open_for_read(Path::new("missing"));
    }
}
