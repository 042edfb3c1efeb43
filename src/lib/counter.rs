//! Incremental counting over a byte source delivered in pieces.

use std::io::{self, ErrorKind, Read};

use tracing::trace;

use crate::CountingBackend;

/// Read size used when none is configured (1 MiB)
pub const DEFAULT_BUFFER_SIZE: usize = 1 << 20;

/// Run counter whose state survives across chunks.
///
/// A chunk boundary is never treated as a word or gap boundary: feeding any split of a
/// buffer gives the same count as feeding the whole buffer at once.
///
/// # Example
/// ```
/// use wordrun::RunCounter;
///
/// let mut counter = RunCounter::new();
/// counter.update(b"hel");
/// counter.update(b"lo wor");
/// counter.update(b"ld");
/// assert_eq!(counter.words(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunCounter {
    backend: CountingBackend,
    previous_was_whitespace: bool,
    words: usize,
}

impl Default for RunCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunCounter {
    /// Fresh counter using the fastest detected backend
    pub fn new() -> Self {
        Self::with_backend(CountingBackend::detect())
    }

    pub fn with_backend(backend: CountingBackend) -> Self {
        Self {
            backend,
            // Start of input behaves as if preceded by whitespace
            previous_was_whitespace: true,
            words: 0,
        }
    }

    pub fn update(&mut self, chunk: &[u8]) {
        let result = self
            .backend
            .count_words_with_state(chunk, self.previous_was_whitespace);
        self.words += result.words;
        self.previous_was_whitespace = result.seen_space;
    }

    pub fn words(&self) -> usize {
        self.words
    }

    pub fn previous_was_whitespace(&self) -> bool {
        self.previous_was_whitespace
    }

    pub fn backend(&self) -> CountingBackend {
        self.backend
    }
}

/// Count words from `reader`, `buffer_size` bytes at a time.
///
/// Interrupted reads are retried; any other I/O error is returned.
pub fn count_reader<R: Read>(mut reader: R, buffer_size: usize) -> io::Result<usize> {
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut counter = RunCounter::new();

    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        trace!(bytes = read, "read chunk");
        counter.update(&buffer[..read]);
    }

    Ok(counter.words())
}
