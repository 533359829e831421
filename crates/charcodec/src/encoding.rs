//! The closed set of supported external encodings.

use core::{fmt, str::FromStr};

use crate::error::ParseEncodingError;

/// An external character encoding.
///
/// Equality is ordinal equality. [`CharEncoding::Default`] stands for the
/// platform choice and must be [resolved](CharEncoding::resolve) before it
/// names a concrete encoding; [`CharEncoding::Invalid`] is the result of
/// naming an unknown encoding and cannot be used for conversion.
///
/// # Examples
///
/// ```rust
/// use charcodec::CharEncoding;
///
/// assert_eq!(CharEncoding::from_name("utf16le"), CharEncoding::Utf16Le);
/// assert_eq!(CharEncoding::from_name("UTF-8"), CharEncoding::Invalid);
/// assert_eq!(CharEncoding::Default.resolve(), CharEncoding::Ansi);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(rename_all = "lowercase"))]
pub enum CharEncoding {
    /// An unrecognized encoding.
    Invalid,
    /// The ANSI codepage of the host locale.
    Ansi,
    /// The OEM (console) codepage of the host locale.
    Oem,
    /// UTF-8.
    Utf8,
    /// Big endian UTF-16.
    Utf16Be,
    /// Little endian UTF-16.
    Utf16Le,
    /// Big endian UTF-32.
    Utf32Be,
    /// Little endian UTF-32.
    Utf32Le,
    /// The platform default, currently [`CharEncoding::Ansi`].
    #[default]
    Default,
}

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
const UTF16BE_BOM: &[u8] = &[0xfe, 0xff];
const UTF16LE_BOM: &[u8] = &[0xff, 0xfe];
const UTF32BE_BOM: &[u8] = &[0x00, 0x00, 0xfe, 0xff];
const UTF32LE_BOM: &[u8] = &[0xff, 0xfe, 0x00, 0x00];

/// BOMs in detection order. The UTF-32LE mark starts with the UTF-16LE one,
/// so the four byte marks are checked first.
const BOMS: [(CharEncoding, &[u8]); 5] = [
    (CharEncoding::Utf32Be, UTF32BE_BOM),
    (CharEncoding::Utf32Le, UTF32LE_BOM),
    (CharEncoding::Utf16Be, UTF16BE_BOM),
    (CharEncoding::Utf16Le, UTF16LE_BOM),
    (CharEncoding::Utf8, UTF8_BOM),
];

impl CharEncoding {
    /// Every ordinal, in declaration order.
    pub const ALL: [CharEncoding; 9] = [
        CharEncoding::Invalid,
        CharEncoding::Ansi,
        CharEncoding::Oem,
        CharEncoding::Utf8,
        CharEncoding::Utf16Be,
        CharEncoding::Utf16Le,
        CharEncoding::Utf32Be,
        CharEncoding::Utf32Le,
        CharEncoding::Default,
    ];

    /// Looks up an encoding by its lowercase name. Unknown names, including
    /// differently cased ones, give [`CharEncoding::Invalid`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ansi" => Self::Ansi,
            "oem" => Self::Oem,
            "utf8" => Self::Utf8,
            "utf16be" => Self::Utf16Be,
            "utf16le" => Self::Utf16Le,
            "utf32be" => Self::Utf32Be,
            "utf32le" => Self::Utf32Le,
            "default" => Self::Default,
            _ => Self::Invalid,
        }
    }

    /// The name accepted by [`CharEncoding::from_name`], or `None` for
    /// [`CharEncoding::Invalid`].
    #[must_use]
    pub const fn name(self) -> Option<&'static str> {
        Some(match self {
            Self::Invalid => return None,
            Self::Ansi => "ansi",
            Self::Oem => "oem",
            Self::Utf8 => "utf8",
            Self::Utf16Be => "utf16be",
            Self::Utf16Le => "utf16le",
            Self::Utf32Be => "utf32be",
            Self::Utf32Le => "utf32le",
            Self::Default => "default",
        })
    }

    /// Whether this is anything other than [`CharEncoding::Invalid`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Replaces [`CharEncoding::Default`] with the concrete encoding it stands
    /// for. Every other ordinal is returned unchanged.
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Default => Self::Ansi,
            other => other,
        }
    }

    /// Whether this is one of the UTF encodings, which have a BOM.
    #[must_use]
    pub const fn is_unicode(self) -> bool {
        matches!(
            self,
            Self::Utf8 | Self::Utf16Be | Self::Utf16Le | Self::Utf32Be | Self::Utf32Le
        )
    }

    /// The byte order mark for this encoding; empty for codepages.
    #[must_use]
    pub const fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => UTF8_BOM,
            Self::Utf16Be => UTF16BE_BOM,
            Self::Utf16Le => UTF16LE_BOM,
            Self::Utf32Be => UTF32BE_BOM,
            Self::Utf32Le => UTF32LE_BOM,
            Self::Invalid | Self::Ansi | Self::Oem | Self::Default => &[],
        }
    }

    /// Detects a byte order mark at the start of `bytes`, returning the
    /// encoding it announces and its length. Longer marks take precedence,
    /// so `FF FE 00 00` is UTF-32LE rather than UTF-16LE.
    #[must_use]
    pub fn sniff_bom(bytes: &[u8]) -> Option<(CharEncoding, usize)> {
        BOMS.iter()
            .find(|(_, bom)| bytes.starts_with(bom))
            .map(|&(encoding, bom)| (encoding, bom.len()))
    }
}

impl fmt::Display for CharEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or("invalid"))
    }
}

impl FromStr for CharEncoding {
    type Err = ParseEncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_name(s) {
            Self::Invalid => Err(ParseEncodingError {
                name: s.to_owned(),
            }),
            encoding => Ok(encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn names_round_trip() {
        for encoding in CharEncoding::ALL {
            match encoding.name() {
                Some(name) => assert_eq!(CharEncoding::from_name(name), encoding),
                None => assert_eq!(encoding, CharEncoding::Invalid),
            }
        }
    }

    #[rstest]
    #[case("UTF8")]
    #[case("utf-8")]
    #[case("")]
    #[case("invalid")]
    #[case(" ansi")]
    fn unknown_names_are_invalid(#[case] name: &str) {
        assert_eq!(CharEncoding::from_name(name), CharEncoding::Invalid);
        assert_eq!(
            name.parse::<CharEncoding>(),
            Err(ParseEncodingError {
                name: name.to_owned()
            })
        );
    }

    #[rstest]
    #[case(&[0xff, 0xfe, 0x00, 0x00, 0x41], Some((CharEncoding::Utf32Le, 4)))]
    #[case(&[0xff, 0xfe, 0x41, 0x00], Some((CharEncoding::Utf16Le, 2)))]
    #[case(&[0xff, 0xfe, 0x00], Some((CharEncoding::Utf16Le, 2)))]
    #[case(&[0x00, 0x00, 0xfe, 0xff], Some((CharEncoding::Utf32Be, 4)))]
    #[case(&[0xfe, 0xff, 0x00, 0x41], Some((CharEncoding::Utf16Be, 2)))]
    #[case(&[0xef, 0xbb, 0xbf, 0x41], Some((CharEncoding::Utf8, 3)))]
    #[case(&[0xef, 0xbb], None)]
    #[case(&[0x00, 0x00, 0xfe], None)]
    #[case(b"plain", None)]
    #[case(&[], None)]
    fn sniffs_longest_bom(#[case] bytes: &[u8], #[case] expected: Option<(CharEncoding, usize)>) {
        assert_eq!(CharEncoding::sniff_bom(bytes), expected);
    }

    #[test]
    fn bom_matches_sniffing() {
        for encoding in CharEncoding::ALL {
            let bom = encoding.bom();
            if encoding.is_unicode() {
                assert_eq!(CharEncoding::sniff_bom(bom), Some((encoding, bom.len())));
            } else {
                assert!(bom.is_empty());
            }
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&CharEncoding::Utf16Be).unwrap();
        assert_eq!(json, "\"utf16be\"");
        let parsed: CharEncoding = serde_json::from_str("\"oem\"").unwrap();
        assert_eq!(parsed, CharEncoding::Oem);
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(CharEncoding::Utf32Le.to_string(), "utf32le");
        assert_eq!(CharEncoding::Invalid.to_string(), "invalid");
        assert_eq!(CharEncoding::default(), CharEncoding::Default);
    }
}
