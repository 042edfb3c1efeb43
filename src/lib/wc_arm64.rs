//! ARM64 NEON word counting
//!
//! Processes 16 bytes per iteration. Instead of extracting a bitmask, the previous-byte
//! whitespace lanes are built with `vext` from the previous block's whitespace vector, so the
//! carried state never leaves the vector registers inside the loop.

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

use crate::wc_default::{self, ScanResult, is_whitespace_byte};

/// Whitespace lanes of a 16-byte block (0xFF for whitespace, 0x00 otherwise)
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
#[inline]
unsafe fn neon_whitespace_lanes(chunk: uint8x16_t) -> uint8x16_t {
    unsafe {
        let ws_min = vdupq_n_u8(0x09); // tab
        let ws_max = vdupq_n_u8(0x0D); // carriage return
        let space = vdupq_n_u8(b' ');

        // [0x09, 0x0D] covers tab, LF, VT, FF, CR
        let in_range = vandq_u8(vcgeq_u8(chunk, ws_min), vcleq_u8(chunk, ws_max));
        let is_space = vceqq_u8(chunk, space);

        vorrq_u8(in_range, is_space)
    }
}

/// NEON scan seeded with `initial_seen_space`.
///
/// # Algorithm (16 bytes per iteration)
///
/// ```text
/// bytes      [H  e  l  l  o  _  _  _  t  h  e  r  e  !  _  _ ]
/// ws         [00 00 00 00 00 FF FF FF 00 00 00 00 00 00 FF FF]
/// prev_ws    [FF 00 00 00 00 00 FF FF FF 00 00 00 00 00 00 FF]   vext(prev_block_ws, ws, 15)
/// start      [FF 00 00 00 00 00 00 00 FF 00 00 00 00 00 00 00]   !ws & prev_ws
/// ```
///
/// `start >> 7` turns each lane into 0 or 1 and a horizontal add gives the word starts.
///
/// # Safety
///
/// The CPU must support NEON (always true on aarch64).
#[cfg(target_arch = "aarch64")]
#[target_feature(enable = "neon")]
pub(crate) unsafe fn count_words_neon(content: &[u8], initial_seen_space: bool) -> ScanResult {
    const CHUNK_SIZE: usize = 16;

    let mut words = 0;
    let mut seen_space = initial_seen_space;
    let mut chunks = content.chunks_exact(CHUNK_SIZE);

    if content.len() >= CHUNK_SIZE {
        // Only lane 15 of the previous block is ever read by vext
        let mut prev_ws_vec = unsafe { vdupq_n_u8(if seen_space { 0xFF } else { 0x00 }) };

        for chunk in chunks.by_ref() {
            unsafe {
                let bytes = vld1q_u8(chunk.as_ptr());
                let ws = neon_whitespace_lanes(bytes);

                let prev_ws = vextq_u8::<15>(prev_ws_vec, ws);
                let start_mask = vandq_u8(vmvnq_u8(ws), prev_ws);
                let ones = vshrq_n_u8::<7>(start_mask);

                // At most 16 per block, fits the u8 lane sum
                words += vaddvq_u8(ones) as usize;

                prev_ws_vec = ws;
            }

            seen_space = is_whitespace_byte(chunk[CHUNK_SIZE - 1]);
        }
    }

    let tail = wc_default::count_words_scalar_with_state(chunks.remainder(), seen_space);

    ScanResult {
        words: words + tail.words,
        seen_space: tail.seen_space,
    }
}
