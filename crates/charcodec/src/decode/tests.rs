use encoding_rs::{BIG5, Encoding, IBM866, SHIFT_JIS, WINDOWS_1252};
use quickcheck::QuickCheck;
use rstest::rstest;

use super::*;
use crate::{CollectErrors, FileError};

fn quickcheck_tests() -> u64 {
    if is_ci::cached() { 10_000 } else { 1_000 }
}

#[rstest]
#[case(true, &[0x00, 0x41], (2, Some('A')))]
#[case(false, &[0x41, 0x00], (2, Some('A')))]
#[case(true, &[0xd8, 0x34, 0xdd, 0x1e], (4, Some('\u{1d11e}')))]
#[case(false, &[0x34, 0xd8, 0x1e, 0xdd], (4, Some('\u{1d11e}')))]
// truncated unit
#[case(true, &[0x00], (1, None))]
// truncated pair consumes the rest
#[case(true, &[0xd8, 0x34], (2, None))]
#[case(true, &[0xd8, 0x34, 0xdd], (3, None))]
// high surrogate followed by a non-low unit
#[case(true, &[0xd8, 0x34, 0x00, 0x41], (2, None))]
#[case(true, &[0xd8, 0x34, 0xd8, 0x34], (2, None))]
// lone low surrogate
#[case(true, &[0xdd, 0x1e, 0x00, 0x41], (2, None))]
#[case(false, &[0x00, 0xdc], (2, None))]
fn utf16_windows(
    #[case] big_endian: bool,
    #[case] src: &[u8],
    #[case] expected: (usize, Option<char>),
) {
    let (len, ch) = decode_utf16(src, big_endian);
    assert_eq!((len, ch.to_char()), expected);
}

#[rstest]
#[case(true, &[0x00, 0x00, 0x20, 0xac], (4, Some('€')))]
#[case(false, &[0xac, 0x20, 0x00, 0x00, 0xff], (4, Some('€')))]
#[case(true, &[0x00, 0x01, 0xd1, 0x1e], (4, Some('\u{1d11e}')))]
#[case(true, &[0x00, 0x00, 0xd8, 0x00], (4, None))]
#[case(true, &[0x00, 0x11, 0x00, 0x00], (4, None))]
#[case(false, &[0xff, 0xff, 0xff, 0xff], (4, None))]
#[case(true, &[0x00, 0x00, 0x00], (3, None))]
#[case(false, &[0x41], (1, None))]
fn utf32_windows(
    #[case] big_endian: bool,
    #[case] src: &[u8],
    #[case] expected: (usize, Option<char>),
) {
    let (len, ch) = decode_utf32(src, big_endian);
    assert_eq!((len, ch.to_char()), expected);
}

#[test]
fn windows_1252_upper_half() {
    let decoder = LocaleDecoder::new(WINDOWS_1252);
    let decoded: String = b"\x80\x86\xa3\xf7"
        .iter()
        .map(|&b| {
            let (len, ch) = decoder.decode(&[b]);
            assert_eq!(len, 1);
            ch.to_char().unwrap()
        })
        .collect();
    assert_eq!(decoded, "€†£÷");
    assert!((0..=u8::MAX).all(|b| decoder.is_single_byte(b)));
}

#[test]
fn shift_jis_multi_byte() {
    let decoder = LocaleDecoder::new(SHIFT_JIS);
    assert!(decoder.is_single_byte(b'A'));
    assert!(!decoder.is_single_byte(0x82));
    assert_eq!(decoder.decode(b"\x82\xa0xyz"), (2, Char::from('あ')));
    assert_eq!(decoder.decode(b"\xb1"), (1, Char::from('ｱ')));
    // a lead byte with nothing after it
    assert_eq!(decoder.decode(b"\x82"), (1, Char::EOF));
}

#[test]
fn sequence_decoding_to_two_chars_is_reported() {
    // Big5 0x88 0x62 is U+00CA followed by U+0304
    let decoder = LocaleDecoder::new(BIG5);
    assert_eq!(decoder.decode(b"\x88\x62"), (2, Char::EOF));
    assert_eq!(decoder.decode(b"\xa4\xa4"), (2, Char::from('中')));

    let errors = CollectErrors::default();
    let options = CodecOptions {
        ansi: BIG5,
        ..Default::default()
    };
    let converter = InputConverter::new(CharEncoding::Ansi, &options, &errors).unwrap();
    assert_eq!(converter.convert_string(b"\xa4\xa4\x88\x62!").as_str(), "中 !");
    assert_eq!(
        errors.take(),
        vec![FileError::CannotDecode {
            line: 1,
            bytes: "0x88 0x62".into()
        }]
    );
}

#[test]
fn shared_decoders_are_reused() {
    let a = LocaleDecoder::shared(IBM866);
    let b = LocaleDecoder::shared(IBM866);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(a.encoding(), IBM866);
}

#[rstest]
#[case(WINDOWS_1252)]
#[case(IBM866)]
#[case(SHIFT_JIS)]
fn lead_cache_matches_probing(#[case] encoding: &'static Encoding) {
    let decoder = LocaleDecoder::new(encoding);
    for b in 0..=u8::MAX {
        assert_eq!(
            decoder.decode(&[b]),
            decoder.decode_uncached(&[b]),
            "{} byte {b:#04x}",
            encoding.name()
        );
    }
}

#[test]
fn lead_cache_matches_probing_quickcheck() {
    fn prop(bytes: Vec<u8>) -> bool {
        bytes.is_empty()
            || [WINDOWS_1252, IBM866, SHIFT_JIS].into_iter().all(|encoding| {
                let decoder = LocaleDecoder::shared(encoding);
                decoder.decode(&bytes) == decoder.decode_uncached(&bytes)
            })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn invalid_encoding_is_rejected() {
    let err = InputConverter::new(CharEncoding::Invalid, &CodecOptions::default(), IgnoreErrors)
        .unwrap_err();
    assert_eq!(err, ConverterError::InvalidEncoding);
}

#[test]
fn default_resolves_to_ansi() {
    let converter =
        InputConverter::new(CharEncoding::Default, &CodecOptions::default(), IgnoreErrors)
            .unwrap();
    assert_eq!(converter.encoding(), CharEncoding::Ansi);
    assert_eq!(converter.convert_char(b"\x80"), (1, Char::from('€')));
}

#[test]
fn oem_uses_configured_codepage() {
    let converter =
        InputConverter::new(CharEncoding::Oem, &CodecOptions::default(), IgnoreErrors).unwrap();
    // IBM866 0x80 is Cyrillic capital A
    assert_eq!(converter.convert_char(b"\x80"), (1, Char::from('А')));
}

#[test]
fn reports_malformed_input_with_line() {
    let errors = CollectErrors::default();
    let mut converter =
        InputConverter::new(CharEncoding::Utf8, &CodecOptions::default(), &errors).unwrap();
    converter.set_line(4);
    let text = converter.convert_string(b"a\xc3(b\xed\xa0\x80");
    assert_eq!(text.as_str(), "a (b ");

    let rendered = errors
        .reports()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    cannot decode input on line 4: 0xc3
    cannot decode input on line 4: 0xed 0xa0 0x80
    ");
}

#[test]
fn eof_error_char_drops_malformed_input() {
    let options = CodecOptions {
        error_char: Char::EOF,
        ..Default::default()
    };
    let errors = CollectErrors::default();
    let converter = InputConverter::new(CharEncoding::Utf16Le, &options, &errors).unwrap();
    assert_eq!(converter.convert_char(&[0x00, 0xdc]), (2, Char::EOF));
    let text = converter.convert_string(&[0x41, 0x00, 0x00, 0xdc, 0x42, 0x00, 0x43]);
    assert_eq!(text.as_str(), "AB");
    assert_eq!(
        errors.reports().last(),
        Some(&FileError::CannotDecode {
            line: 1,
            bytes: "0x43".into()
        })
    );
    assert_eq!(errors.reports().len(), 3);
}

#[test]
fn rebinding_after_bom() {
    let mut converter =
        InputConverter::new(CharEncoding::Ansi, &CodecOptions::default(), IgnoreErrors).unwrap();
    converter.set_encoding(CharEncoding::Utf16Be).unwrap();
    assert_eq!(converter.encoding(), CharEncoding::Utf16Be);
    assert_eq!(
        converter.set_encoding(CharEncoding::Invalid),
        Err(ConverterError::InvalidEncoding)
    );
    assert_eq!(converter.encoding(), CharEncoding::Utf16Be);
    assert_eq!(converter.convert_char(&[0x00, 0x41]), (2, Char::from('A')));
}

#[test]
fn empty_window() {
    let converter =
        InputConverter::new(CharEncoding::Utf8, &CodecOptions::default(), IgnoreErrors).unwrap();
    assert_eq!(converter.convert_char(&[]), (0, Char::EOF));
}

#[test]
fn decoders_always_make_progress_quickcheck() {
    fn prop(bytes: Vec<u8>) -> bool {
        if bytes.is_empty() {
            return true;
        }
        let options = CodecOptions::default();
        CharEncoding::ALL
            .into_iter()
            .filter(|e| e.is_valid())
            .all(|encoding| {
                let decoder = Decoder::new(encoding, &options).unwrap();
                let (len, _) = decoder.decode(&bytes);
                (1..=bytes.len()).contains(&len)
            })
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<u8>) -> bool);
}
