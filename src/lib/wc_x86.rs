//! x86/x86_64 SIMD word counting
//!
//! Each block is classified into a whitespace bitmask with byte compares and `movemask`,
//! then word starts are counted from the mask with the carried "previous byte was
//! whitespace" bit:
//! - SSE2: 16 bytes/iteration (every x86_64 CPU)
//! - AVX2: 32 bytes/iteration (Intel Haswell+, AMD Excavator+)
//!
//! Bytes left over after the last full block go through the scalar scan with the carried state.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::wc_default::{self, ScanResult, count_word_starts_from_mask};

// ============================================================================
// SSE2
// ============================================================================

/// Whitespace bitmask of a 16-byte block (bit i set = byte i is whitespace)
#[target_feature(enable = "sse2")]
#[inline]
unsafe fn sse2_whitespace_mask(chunk: __m128i) -> u32 {
    let space = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b' ' as i8));
    let tab = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\t' as i8));
    let newline = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\n' as i8));
    let vt = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(0x0B));
    let ff = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(0x0C));
    let cr = _mm_cmpeq_epi8(chunk, _mm_set1_epi8(b'\r' as i8));

    let ws1 = _mm_or_si128(space, tab);
    let ws2 = _mm_or_si128(newline, vt);
    let ws3 = _mm_or_si128(ff, cr);
    let ws = _mm_or_si128(_mm_or_si128(ws1, ws2), ws3);

    _mm_movemask_epi8(ws) as u32
}

/// SSE2 scan seeded with `initial_seen_space`.
///
/// # Safety
///
/// The CPU must support SSE2.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn count_words_sse2(content: &[u8], initial_seen_space: bool) -> ScanResult {
    const CHUNK_SIZE: usize = 16;

    let mut words = 0;
    let mut seen_space = initial_seen_space;
    let mut chunks = content.chunks_exact(CHUNK_SIZE);

    for chunk in chunks.by_ref() {
        let ws_mask = unsafe {
            let chunk_vec = _mm_loadu_si128(chunk.as_ptr() as *const __m128i);
            sse2_whitespace_mask(chunk_vec)
        };
        let (starts, last_is_ws) =
            count_word_starts_from_mask(ws_mask, CHUNK_SIZE as u32, seen_space);
        words += starts;
        seen_space = last_is_ws;
    }

    let tail = wc_default::count_words_scalar_with_state(chunks.remainder(), seen_space);

    ScanResult {
        words: words + tail.words,
        seen_space: tail.seen_space,
    }
}

// ============================================================================
// AVX2
// ============================================================================

/// Whitespace bitmask of a 32-byte block
#[target_feature(enable = "avx2")]
#[inline]
unsafe fn avx2_whitespace_mask(chunk: __m256i) -> u32 {
    let space = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b' ' as i8));
    let tab = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\t' as i8));
    let newline = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\n' as i8));
    let vt = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(0x0B));
    let ff = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(0x0C));
    let cr = _mm256_cmpeq_epi8(chunk, _mm256_set1_epi8(b'\r' as i8));

    let ws1 = _mm256_or_si256(space, tab);
    let ws2 = _mm256_or_si256(newline, vt);
    let ws3 = _mm256_or_si256(ff, cr);
    let ws = _mm256_or_si256(_mm256_or_si256(ws1, ws2), ws3);

    // movemask fills all 32 bits; reinterpret rather than sign-extend
    _mm256_movemask_epi8(ws) as u32
}

/// AVX2 scan seeded with `initial_seen_space`.
///
/// # Safety
///
/// The CPU must support AVX2.
#[target_feature(enable = "avx2")]
pub(crate) unsafe fn count_words_avx2(content: &[u8], initial_seen_space: bool) -> ScanResult {
    const CHUNK_SIZE: usize = 32;

    let mut words = 0;
    let mut seen_space = initial_seen_space;
    let mut chunks = content.chunks_exact(CHUNK_SIZE);

    for chunk in chunks.by_ref() {
        let ws_mask = unsafe {
            let chunk_vec = _mm256_loadu_si256(chunk.as_ptr() as *const __m256i);
            avx2_whitespace_mask(chunk_vec)
        };
        let (starts, last_is_ws) =
            count_word_starts_from_mask(ws_mask, CHUNK_SIZE as u32, seen_space);
        words += starts;
        seen_space = last_is_ws;
    }

    // A 16..31 byte tail still goes through SSE2 before the scalar remainder
    let tail = unsafe { count_words_sse2(chunks.remainder(), seen_space) };

    ScanResult {
        words: words + tail.words,
        seen_space: tail.seen_space,
    }
}
