#![no_main]
use arbitrary::Arbitrary;
use charcodec::{
    CharEncoding, CodecOptions, Decoder, EncodedInput, IgnoreErrors, IoInput, OutputConverter,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    encoding: u8,
    buffer_size: u16,
    bytes: Vec<u8>,
}

fn run(input: &Input) {
    let valid: Vec<CharEncoding> = CharEncoding::ALL
        .into_iter()
        .filter(|e| e.is_valid())
        .collect();
    let encoding = valid[usize::from(input.encoding) % valid.len()];
    let options = CodecOptions {
        buffer_size: usize::from(input.buffer_size),
        ..Default::default()
    };

    // every window makes progress without overrunning
    let decoder = Decoder::new(encoding, &options).unwrap();
    let mut rest = input.bytes.as_slice();
    while !rest.is_empty() {
        let (len, _) = decoder.decode(rest);
        assert!((1..=rest.len()).contains(&len), "{encoding}: {len} of {}", rest.len());
        rest = &rest[len..];
    }

    // the stream sees the same input regardless of buffer size
    let mut stream = EncodedInput::from_raw(
        IoInput::new(input.bytes.as_slice()),
        "fuzz",
        encoding,
        &options,
        IgnoreErrors,
    )
    .unwrap();
    let text = stream.read_string(usize::MAX);
    assert!(stream.is_eof());

    // decoded text survives a trip through its own encoding, unless the
    // re-encoded bytes happen to start like a byte order mark
    if stream.encoding().is_unicode() {
        let output = OutputConverter::new(stream.encoding(), &options, IgnoreErrors).unwrap();
        let bytes = output.convert_string(&text).unwrap();
        if CharEncoding::sniff_bom(&bytes).is_none() {
            let again = EncodedInput::from_raw(
                IoInput::new(bytes.as_slice()),
                "fuzz",
                stream.encoding(),
                &options,
                IgnoreErrors,
            )
            .unwrap()
            .read_string(usize::MAX);
            assert_eq!(text, again);
        }
    }
}

fuzz_target!(|input: Input| run(&input));
