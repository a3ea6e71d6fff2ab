#![no_main]
use std::io::BufReader;

use arbitrary::Arbitrary;
use json5extract::{Kind, ReadSource, Recovery, ScanOptions, Value, scan_bytes_with, scan_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    rewind: bool,
    capacity: u8,
    max_depth: u8,
    bytes: &'a [u8],
}

fn summary(values: &[Value]) -> Vec<(Kind, &str)> {
    values.iter().map(|v| (v.kind(), v.raw_text())).collect()
}

fn scan(input: &Input<'_>) {
    let options = ScanOptions {
        recovery: if input.rewind {
            Recovery::Rewind
        } else {
            Recovery::Forward
        },
        max_depth: usize::from(input.max_depth),
    };

    let whole = scan_bytes_with(input.bytes, options).expect("byte slices never fault");

    // Chunked decoding must agree with whole-slice decoding.
    let reader = BufReader::with_capacity(1 + usize::from(input.capacity % 16), input.bytes);
    let streamed = scan_with(ReadSource::new(reader), options).expect("byte slices never fault");
    assert_eq!(summary(&whole), summary(&streamed));

    // Scalars keep their source text verbatim.
    let text = String::from_utf8_lossy(input.bytes);
    for value in &whole {
        if !matches!(value.kind(), Kind::Array | Kind::Object) {
            assert!(
                text.contains(value.raw_text()),
                "{:?} not found in input",
                value.raw_text()
            );
        }
    }
}

fuzz_target!(|input: Input<'_>| scan(&input));
