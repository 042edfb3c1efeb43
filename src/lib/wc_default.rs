//! Scalar run counter: the reference implementation every other backend is checked against.

/// Result of a scan that started from a caller-provided state
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScanResult {
    pub words: usize,
    /// Whether the last byte scanned was whitespace (the seed for the next chunk)
    pub seen_space: bool,
}

/// Count maximal runs of non-whitespace bytes in `content`.
pub fn count_words_scalar(content: &[u8]) -> usize {
    count_words_scalar_with_state(content, true).words
}

/// Scalar scan seeded with `initial_seen_space`.
///
/// `initial_seen_space` is `true` at start of input, and otherwise the classification of the
/// byte immediately preceding `content`.
pub(crate) fn count_words_scalar_with_state(content: &[u8], initial_seen_space: bool) -> ScanResult {
    let mut words = 0;
    let mut seen_space = initial_seen_space;

    for &byte in content {
        let is_space = is_whitespace_byte(byte);
        if !is_space && seen_space {
            words += 1;
        }
        seen_space = is_space;
    }

    ScanResult { words, seen_space }
}

/// ASCII whitespace: space (0x20) or the range [0x09-0x0D] (tab, LF, VT, FF, CR)
#[inline]
pub fn is_whitespace_byte(byte: u8) -> bool {
    matches!(byte, b' ' | 0x09..=0x0D)
}

/// Count word starts in one block from its whitespace bitmask.
///
/// Bit `i` of `ws_mask` is set when byte `i` of the block is whitespace; only the low `width`
/// bits are meaningful. A word start is `!ws[i] && ws[i - 1]`, with `ws[-1]` taken from
/// `seen_space_before`. Returns the count and whether the block's last byte was whitespace.
#[cfg_attr(
    not(any(target_arch = "x86", target_arch = "x86_64")),
    allow(dead_code)
)]
#[inline]
pub(crate) fn count_word_starts_from_mask(
    ws_mask: u32,
    width: u32,
    seen_space_before: bool,
) -> (usize, bool) {
    debug_assert!((1..=32).contains(&width));
    let lanes = u32::MAX >> (32 - width);
    let not_ws = !ws_mask & lanes;

    // Shift left so bit i holds "byte i-1 was whitespace"; bit 0 comes from the carry
    let prev_was_ws = (ws_mask << 1) | u32::from(seen_space_before);

    let count = (not_ws & prev_was_ws).count_ones() as usize;
    let last_is_ws = (ws_mask >> (width - 1)) & 1 == 1;

    (count, last_is_ws)
}
