//! Multi-threaded counting over one in-memory buffer.
//!
//! The buffer is cut into contiguous chunks, one per worker. Chunk `k > 0` is seeded with the
//! classification of the byte just before it, so a word straddling a cut is counted once, by
//! the chunk where it starts.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::CountingBackend;
use crate::wc_default::is_whitespace_byte;

/// Below this size a single thread is faster than spinning up workers (1 MiB)
pub const PARALLEL_THRESHOLD: usize = 1 << 20;

/// Upper bound on worker count
pub const MAX_THREADS: usize = 256;

/// One less than the available CPUs, at least one
pub fn default_threads() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

/// A contiguous slice of the input and the state it starts in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ChunkPlan {
    pub start: usize,
    pub end: usize,
    pub seen_space: bool,
}

/// Split `content` into at most `threads` chunks of `ceil(len / threads)` bytes.
///
/// Never plans more chunks than bytes or more than `MAX_THREADS`; empty input has no chunks.
pub(crate) fn plan_chunks(content: &[u8], threads: usize) -> Vec<ChunkPlan> {
    let len = content.len();
    if len == 0 {
        return Vec::new();
    }

    let threads = threads.clamp(1, MAX_THREADS).min(len);
    let chunk_len = len.div_ceil(threads);

    (0..threads)
        .map(|t| t * chunk_len)
        .take_while(|&start| start < len)
        .map(|start| ChunkPlan {
            start,
            end: (start + chunk_len).min(len),
            seen_space: start == 0 || is_whitespace_byte(content[start - 1]),
        })
        .collect()
}

/// Count words using up to `threads` workers.
///
/// Inputs under `PARALLEL_THRESHOLD` are scanned on the calling thread.
pub fn count_words_parallel(content: &[u8], threads: usize) -> usize {
    if content.len() < PARALLEL_THRESHOLD || threads <= 1 {
        return CountingBackend::detect().count_words(content);
    }
    count_words_chunked(content, threads)
}

/// Like `count_words_parallel` but always splits, regardless of input size.
pub fn count_words_chunked(content: &[u8], threads: usize) -> usize {
    let backend = CountingBackend::detect();
    let plan = plan_chunks(content, threads);
    if plan.is_empty() {
        return 0;
    }
    debug!(%backend, chunks = plan.len(), bytes = content.len(), "parallel scan");

    let run = || -> usize {
        plan.par_iter()
            .map(|chunk| {
                backend
                    .count_words_with_state(&content[chunk.start..chunk.end], chunk.seen_space)
                    .words
            })
            .sum()
    };

    match rayon::ThreadPoolBuilder::new()
        .num_threads(plan.len())
        .build()
    {
        Ok(pool) => pool.install(run),
        Err(err) => {
            warn!(error = %err, "could not build thread pool, using the global pool");
            run()
        }
    }
}
