#![no_main]

use libfuzzer_sys::fuzz_target;
use wordrun::wc_parallel::count_words_chunked;
use wordrun::{RunCounter, count_reader};

fuzz_target!(|data: &[u8]| {
    // Chunk, read and thread boundaries must never split or merge words
    if data.is_empty() {
        return;
    }

    // First byte picks the chunk size, the rest is the payload
    let step = usize::from(data[0]).max(1);
    let payload = &data[1..];
    let expected = wordrun::count(payload);

    let mut counter = RunCounter::new();
    for chunk in payload.chunks(step) {
        counter.update(chunk);
    }
    assert_eq!(counter.words(), expected, "chunked update mismatch (step {step})");

    let streamed = count_reader(payload, step).expect("reading a slice cannot fail");
    assert_eq!(streamed, expected, "reader mismatch (step {step})");

    let threads = usize::from(data[0] % 16) + 1;
    assert_eq!(count_words_chunked(payload, threads), expected, "parallel mismatch");
});
