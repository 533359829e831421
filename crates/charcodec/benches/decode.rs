//! Benchmark – decoding and encoding throughput per encoding
#![allow(missing_docs)]

use std::time::Duration;

use charcodec::{
    CharEncoding, CodecOptions, EncodedInput, IgnoreErrors, InputConverter, IoInput,
    OutputConverter, Utf8String,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

const ENCODINGS: [CharEncoding; 6] = [
    CharEncoding::Ansi,
    CharEncoding::Utf8,
    CharEncoding::Utf16Be,
    CharEncoding::Utf16Le,
    CharEncoding::Utf32Be,
    CharEncoding::Utf32Le,
];

/// Mixed-script text with a newline every few words. With `ansi_only` every
/// character is representable in windows-1252.
fn make_text(target_chars: usize, ansi_only: bool) -> Utf8String {
    let words: &[&str] = if ansi_only {
        &["plain", "café", "€uro", "naïve", "\r\n", "tab\t", "£5"]
    } else {
        &["plain", "café", "€uro", "日本語", "\r\n", "𝄞", "Ωμέγα"]
    };
    let mut text = Utf8String::new();
    let mut chars = 0;
    for word in words.iter().cycle() {
        if chars >= target_chars {
            break;
        }
        text.push_str(word);
        text.push_str(" ");
        chars += word.chars().count() + 1;
    }
    text
}

fn encode(text: &Utf8String, encoding: CharEncoding) -> Vec<u8> {
    OutputConverter::new(encoding, &CodecOptions::default(), IgnoreErrors)
        .unwrap()
        .convert_string(text)
        .expect("benchmark text is representable")
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    for encoding in ENCODINGS {
        let text = make_text(20_000, encoding == CharEncoding::Ansi);
        let bytes = encode(&text, encoding);
        let options = CodecOptions::default();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        let input = InputConverter::new(encoding, &options, IgnoreErrors).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", encoding), &bytes, |b, bytes| {
            b.iter(|| black_box(input.convert_string(black_box(bytes))));
        });

        let output = OutputConverter::new(encoding, &options, IgnoreErrors).unwrap();
        group.bench_with_input(BenchmarkId::new("encode", encoding), &text, |b, text| {
            b.iter(|| black_box(output.convert_string(black_box(text))));
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoded_input");
    for encoding in ENCODINGS {
        let text = make_text(20_000, encoding == CharEncoding::Ansi);
        let bytes = encode(&text, encoding);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        for &buffer_size in &[64usize, 1_024, 16_384] {
            let options = CodecOptions {
                buffer_size,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(encoding.to_string(), buffer_size),
                &bytes,
                |b, bytes| {
                    b.iter(|| {
                        let mut input = EncodedInput::from_raw(
                            IoInput::new(bytes.as_slice()),
                            "bench",
                            encoding,
                            &options,
                            IgnoreErrors,
                        )
                        .unwrap();
                        black_box(input.read_string(usize::MAX));
                    });
                },
            );
        }
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_convert, bench_stream }
criterion_main!(benches);
