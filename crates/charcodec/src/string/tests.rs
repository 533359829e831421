use core::fmt::Write;

use quickcheck::QuickCheck;
use rstest::rstest;

use super::*;

#[test]
fn rejects_malformed_bytes() {
    assert_eq!(
        Utf8String::from_utf8(b"ab\xc3(".to_vec()),
        Err(InvalidUtf8 { valid_up_to: 2 })
    );
    assert_eq!(
        Utf8String::from_utf8_slice(b"\xed\xa0\x80"),
        Err(InvalidUtf8 { valid_up_to: 0 })
    );
    let s = Utf8String::from_utf8("héllo".into()).unwrap();
    assert_eq!(s, "héllo");
}

#[test]
fn push_ignores_eof() {
    let mut s = Utf8String::new();
    s.push(Char::from('a'));
    s.push(Char::EOF);
    s.push(Char::new(0x1_d11e));
    s += Char::from('é');
    assert_eq!(s.as_bytes(), "a\u{1d11e}é".as_bytes());
    assert_eq!(Utf8String::from(Char::EOF), "");
}

#[test]
fn cursor_walks_both_directions() {
    let s = Utf8String::from("a€\u{1d11e}z");
    let mut it = s.begin();
    let mut forward = vec![];
    while !it.at_end() {
        forward.push(it.get());
        it.advance();
    }
    assert_eq!(it, s.end());
    assert_eq!(it.get(), Char::EOF);

    let mut backward = vec![];
    while !it.at_begin() {
        it.retreat();
        backward.push(it.get());
    }
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward, s.chars().collect::<Vec<_>>());
    assert_eq!(s.begin().next_pos().offset(), 1);
    assert_eq!(s.end().prev_pos().offset(), 8);
}

#[test]
fn cursor_stops_at_the_ends() {
    let s = Utf8String::from("x");
    let mut it = s.end();
    it.advance();
    assert!(it.at_end());
    let mut it = s.begin();
    it.retreat();
    assert!(it.at_begin());
    assert!(s.begin() < s.end());
}

#[test]
fn cursors_of_different_strings_are_unordered() {
    let a = Utf8String::from("same");
    let b = Utf8String::from("same");
    assert_ne!(a.begin(), b.begin());
    assert_eq!(a.begin().partial_cmp(&b.begin()), None);
}

#[rstest]
#[case("hello world", "o", (4, 5), (7, 8))]
#[case("hello world", "world", (6, 11), (6, 11))]
#[case("hello world", "xyz", (11, 11), (11, 11))]
#[case("€ and €", "€", (0, 3), (8, 11))]
#[case("", "a", (0, 0), (0, 0))]
fn find_first_and_last(
    #[case] haystack: &str,
    #[case] needle: &str,
    #[case] first: (usize, usize),
    #[case] last: (usize, usize),
) {
    let s = Utf8String::from(haystack);
    let f = s.find_first(needle);
    assert_eq!((f.first.offset(), f.second.offset()), first);
    let l = s.find_last(needle);
    assert_eq!((l.first.offset(), l.second.offset()), last);
}

#[test]
fn find_chars_and_next() {
    let s = Utf8String::from("a=b=c");
    let first = s.find_first_char(Char::from('='));
    assert_eq!(first.first.substr_before(), "a");
    let next = first.second.find_next_char(Char::from('='));
    assert_eq!(next.first.offset(), 3);
    assert_eq!(next.second.substr_after(), "c");
    let none = next.second.find_next("=");
    assert!(none.is_none());
    assert_eq!(none.first, s.end());
    assert!(s.find_last_char(Char::EOF).is_none());
    assert_eq!(s.find_last_char(Char::from('=')).first.offset(), 3);
}

#[test]
fn ranges_copy_text() {
    let s = Utf8String::from("prefix[body]suffix");
    let open = s.find_first("[");
    let close = s.find_first("]");
    let body = Utf8String::from_range(open.second, close.first);
    assert_eq!(body, "body");
    assert_eq!(StringIterPair::new(open.first, close.second).as_str(), "[body]");
}

#[test]
#[should_panic(expected = "cursors out of order")]
fn ranges_must_be_ordered() {
    let s = Utf8String::from("abc");
    let _ = StringIterPair::new(s.end(), s.begin());
}

#[test]
fn case_helpers() {
    let s = Utf8String::from("Hello, Wörld");
    assert_eq!(s.to_upper_copy(), "HELLO, WöRLD");
    assert_eq!(s.to_lower_copy(), "hello, wörld");
    assert!(!s.caseless_eq("hELLO, wÖrld"));
    assert!(s.caseless_eq("hELLO, wörLD"));
    assert!(!s.caseless_eq("hello"));
    assert!(s.caseless_begins_with("HELLO"));
    assert!(!s.caseless_begins_with("Hello, World and more"));
    assert!(s.begins_with("Hell"));
    assert!(s.ends_with("rld"));
    assert!(!s.ends_with("RLD"));
}

#[test]
fn trim_uses_char_whitespace() {
    let s = Utf8String::from(" \t\x0b\x0ctext\n ");
    assert_eq!(s.trim_copy(), "text");
    // carriage return is not whitespace
    assert_eq!(Utf8String::from("\rtext\r").trim_copy(), "\rtext\r");
    assert_eq!(Utf8String::from("\u{a0}x").trim_copy(), "\u{a0}x");
}

#[test]
fn front_and_back() {
    let s = Utf8String::from("€xyz\u{1d11e}");
    assert_eq!(s.front(), '€');
    assert_eq!(s.back(), '\u{1d11e}');
    assert_eq!(Utf8String::new().front(), Char::EOF);
    assert_eq!(Utf8String::new().back(), Char::EOF);
}

#[test]
fn chars_are_double_ended() {
    let s = Utf8String::from("abc");
    let rev: Utf8String = s.chars().rev().collect();
    assert_eq!(rev, "cba");
    let mut chars = s.chars();
    assert_eq!(chars.next(), Some(Char::from('a')));
    assert_eq!(chars.next_back(), Some(Char::from('c')));
    assert_eq!(chars.as_str(), "b");
}

#[test]
fn concatenation_and_formatting() {
    let mut s = Utf8String::from("a") + "b" + &Utf8String::from("c") + Char::from('d');
    s += "e";
    write!(s, "{}", 42).unwrap();
    s.put_str("!");
    s.put_char(Char::EOF);
    assert_eq!(s.to_string(), "abcde42!");
    assert_eq!(format!("{s:?}"), "\"abcde42!\"");
    s.clear();
    assert!(s.is_empty());
}

#[test]
fn utf16le_conversion() {
    let s = Utf8String::from("A\u{1d11e}");
    assert_eq!(s.to_utf16le(), vec![0x41, 0x00, 0x34, 0xd8, 0x1e, 0xdd]);
}

#[test]
fn cursor_matches_std_char_indices_quickcheck() {
    fn prop(text: String) -> bool {
        let s = Utf8String::from(text.as_str());
        let mut it = s.begin();
        for (offset, ch) in text.char_indices() {
            if it.offset() != offset || it.get() != ch {
                return false;
            }
            it.advance();
        }
        for (offset, _) in text.char_indices().rev() {
            it.retreat();
            if it.offset() != offset {
                return false;
            }
        }
        it.at_begin() && s.byte_len() == text.len()
    }

    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    QuickCheck::new()
        .tests(tests)
        .quickcheck(prop as fn(String) -> bool);
}
