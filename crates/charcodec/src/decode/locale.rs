use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

use encoding_rs::{DecoderResult, Encoding};

use super::MAX_INPUT_CHAR_BYTES;
use crate::Char;

/// What a lone byte decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lead {
    /// A complete character on its own.
    Single(Char),
    /// Rejected on its own.
    Malformed,
    /// The start of a longer sequence.
    Multi,
}

/// Outcome of feeding a window of bytes to a fresh codepage decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Complete(usize, Char),
    Malformed(usize),
    Partial,
}

fn attempt(encoding: &'static Encoding, bytes: &[u8]) -> Attempt {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut units = [0u16; 8];
    let (result, read, written) =
        decoder.decode_to_utf16_without_replacement(bytes, &mut units, false);
    match result {
        DecoderResult::Malformed(len, _) => Attempt::Malformed(usize::from(len).max(1)),
        // one sequence mapping to several characters cannot be one Char
        _ if written > 0 => match Char::from_utf16(&units[..written]) {
            (used, ch) if ch.is_eof() || used != written => Attempt::Malformed(read.max(1)),
            (_, ch) => Attempt::Complete(read.max(1), ch),
        },
        _ => Attempt::Partial,
    }
}

static DECODERS: LazyLock<RwLock<HashMap<&'static str, Arc<LocaleDecoder>>>> =
    LazyLock::new(RwLock::default);

/// A decoder for a legacy codepage with a per lead byte cache.
///
/// Bytes that decode to a character on their own, or that are rejected on
/// their own, are answered from the cache. Only lead bytes of multi-byte
/// sequences go back to the codepage, with windows of growing length.
pub struct LocaleDecoder {
    encoding: &'static Encoding,
    leads: [Lead; 256],
}

impl LocaleDecoder {
    /// Decodes every byte value once to build the cache.
    #[must_use]
    pub fn new(encoding: &'static Encoding) -> Self {
        let mut leads = [Lead::Multi; 256];
        for (byte, lead) in (0..=u8::MAX).zip(leads.iter_mut()) {
            *lead = match attempt(encoding, &[byte]) {
                Attempt::Complete(_, ch) => Lead::Single(ch),
                Attempt::Malformed(_) => Lead::Malformed,
                Attempt::Partial => Lead::Multi,
            };
        }
        tracing::trace!(
            encoding = encoding.name(),
            single = leads.iter().filter(|l| matches!(l, Lead::Single(_))).count(),
            "built lead byte cache"
        );
        Self { encoding, leads }
    }

    /// A decoder for `encoding` shared by every caller in the process. The
    /// cache is built on first request and read-only afterwards.
    #[must_use]
    pub fn shared(encoding: &'static Encoding) -> Arc<Self> {
        let cached = DECODERS
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(encoding.name())
            .cloned();
        if let Some(decoder) = cached {
            return decoder;
        }
        let mut decoders = DECODERS.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            decoders
                .entry(encoding.name())
                .or_insert_with(|| Arc::new(Self::new(encoding))),
        )
    }

    /// The codepage this decoder reads.
    #[must_use]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether `byte` decodes to a character on its own.
    #[must_use]
    pub fn is_single_byte(&self, byte: u8) -> bool {
        matches!(self.leads[usize::from(byte)], Lead::Single(_))
    }

    /// Decodes one character from the front of `src`, returning the bytes
    /// consumed and the character, or [`Char::EOF`] if the input is
    /// malformed or ends inside a sequence.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty.
    #[must_use]
    pub fn decode(&self, src: &[u8]) -> (usize, Char) {
        match self.leads[usize::from(src[0])] {
            Lead::Single(ch) => (1, ch),
            Lead::Malformed => (1, Char::EOF),
            Lead::Multi => self.widen_from(src, 2),
        }
    }

    /// Same as [`LocaleDecoder::decode`] without consulting the cache.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty.
    #[must_use]
    pub fn decode_uncached(&self, src: &[u8]) -> (usize, Char) {
        assert!(!src.is_empty(), "cannot decode an empty window");
        self.widen_from(src, 1)
    }

    fn widen_from(&self, src: &[u8], first: usize) -> (usize, Char) {
        let max = src.len().min(MAX_INPUT_CHAR_BYTES);
        for len in first..=max {
            match attempt(self.encoding, &src[..len]) {
                Attempt::Complete(read, ch) => return (read, ch),
                Attempt::Malformed(read) => return (read, Char::EOF),
                Attempt::Partial => {}
            }
        }
        (max, Char::EOF)
    }
}

impl core::fmt::Debug for LocaleDecoder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocaleDecoder")
            .field("encoding", &self.encoding.name())
            .finish_non_exhaustive()
    }
}
