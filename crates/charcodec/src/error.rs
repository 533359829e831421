use std::path::PathBuf;

use thiserror::Error;

use crate::{Char, CharEncoding};

/// A condition reported to an [`ErrorHandler`](crate::ErrorHandler).
///
/// None of these abort a conversion. Decode errors are replaced by the
/// configured substitute, encode errors skip the character, and I/O errors
/// leave the stream failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    /// Malformed input; `bytes` is a hex dump such as `"0xc3 0x28"`.
    #[error("cannot decode input on line {line}: {bytes}")]
    #[allow(missing_docs)]
    CannotDecode { line: u32, bytes: String },
    /// A character with no representation in the output encoding.
    #[error("cannot encode {} for output", DisplayChar(*ch))]
    #[allow(missing_docs)]
    CannotEncode { ch: Char },
    /// The source file could not be opened.
    #[error("cannot open '{}' for reading", path.display())]
    #[allow(missing_docs)]
    CannotOpenForRead { path: PathBuf },
    /// Reading the source failed after it was opened.
    #[error("error reading '{}'", path.display())]
    #[allow(missing_docs)]
    ReadError { path: PathBuf },
    /// The destination file could not be created.
    #[error("cannot open '{}' for writing", path.display())]
    #[allow(missing_docs)]
    CannotOpenForWrite { path: PathBuf },
    /// Writing or closing the destination failed.
    #[error("error writing '{}'", path.display())]
    #[allow(missing_docs)]
    WriteError { path: PathBuf },
}

struct DisplayChar(Char);

impl core::fmt::Display for DisplayChar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0.to_u32() {
            Some(value) => write!(f, "U+{value:04X}"),
            None => f.write_str("EOF"),
        }
    }
}

/// Failure to construct a converter or stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConverterError {
    /// The encoding was [`CharEncoding::Invalid`].
    #[error("cannot convert with an invalid encoding")]
    InvalidEncoding,
}

/// An encoding name not accepted by [`CharEncoding::from_name`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown character encoding '{name}'")]
pub struct ParseEncodingError {
    pub(crate) name: String,
}

impl ParseEncodingError {
    /// The rejected name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Bytes which are not well-formed UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid UTF-8 after {valid_up_to} bytes")]
pub struct InvalidUtf8 {
    /// Length of the longest valid prefix.
    pub valid_up_to: usize,
}

impl From<core::str::Utf8Error> for InvalidUtf8 {
    fn from(err: core::str::Utf8Error) -> Self {
        Self {
            valid_up_to: err.valid_up_to(),
        }
    }
}

pub(crate) fn ensure_valid(encoding: CharEncoding) -> Result<CharEncoding, ConverterError> {
    match encoding.resolve() {
        CharEncoding::Invalid => Err(ConverterError::InvalidEncoding),
        encoding => Ok(encoding),
    }
}

/// Renders bytes as `0x..` pairs separated by spaces.
pub(crate) fn hex_dump(bytes: &[u8]) -> String {
    use core::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 5);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{b:#04x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_dump_is_lowercase_and_spaced() {
        assert_eq!(hex_dump(&[0x00, 0xab, 0x7f]), "0x00 0xab 0x7f");
        assert_eq!(hex_dump(&[0x80]), "0x80");
        assert_eq!(hex_dump(&[]), "");
    }

    #[test]
    fn messages() {
        let err = FileError::CannotDecode {
            line: 3,
            bytes: hex_dump(&[0xc3, 0x28]),
        };
        assert_eq!(err.to_string(), "cannot decode input on line 3: 0xc3 0x28");
        let err = FileError::CannotEncode {
            ch: Char::from('€'),
        };
        assert_eq!(err.to_string(), "cannot encode U+20AC for output");
        let err = FileError::WriteError {
            path: PathBuf::from("out.txt"),
        };
        assert_eq!(err.to_string(), "error writing 'out.txt'");
    }
}
