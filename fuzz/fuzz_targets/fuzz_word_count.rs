#![no_main]

use libfuzzer_sys::fuzz_target;
use wordrun::wc_default::{count_words_scalar, is_whitespace_byte};
use wordrun::wc_pattern::count_words_pattern;

fuzz_target!(|data: &[u8]| {
    // Linear scan and pattern match are two formulations of the same automaton
    let scan = count_words_scalar(data);
    let pattern = count_words_pattern(data);
    assert_eq!(scan, pattern, "scan/pattern mismatch");

    let reference = data
        .split(|&b| is_whitespace_byte(b))
        .filter(|piece| !piece.is_empty())
        .count();
    assert_eq!(scan, reference, "scan/split mismatch");

    assert!(scan <= data.len().div_ceil(2), "words cannot exceed half the bytes (rounded up)");
});
