mod read_fault;

use crate::{Value, scan_str};

/// Raw texts of every value extracted from `text` with default options.
fn raw_texts(text: &str) -> Vec<String> {
    scan_str(text)
        .unwrap()
        .iter()
        .map(|value| value.raw_text().to_owned())
        .collect()
}

/// The single value extracted from `text`.
fn only_value(text: &str) -> Value {
    let mut values = scan_str(text).unwrap();
    assert_eq!(values.len(), 1, "{text:?} yielded {values:?}");
    values.remove(0)
}

/// Number of QuickCheck iterations for property tests.
fn property_tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
