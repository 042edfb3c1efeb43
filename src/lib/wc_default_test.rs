#[cfg(test)]
pub mod tests {
    use crate::wc_default::{
        count_word_starts_from_mask, count_words_scalar, count_words_scalar_with_state,
        is_whitespace_byte,
    };
    use pretty_assertions::assert_eq;
    use proptest::collection::vec as prop_vec;
    use proptest::prelude::*;
    use rstest::rstest;
    use rstest_reuse;
    use rstest_reuse::*;

    /// Independent reference: split on whitespace and count the non-empty pieces
    pub fn reference_count(input: &[u8]) -> usize {
        input
            .split(|&b| is_whitespace_byte(b))
            .filter(|piece| !piece.is_empty())
            .count()
    }

    // Template: Common test cases for word counting
    // Reused by every backend test module
    #[template]
    #[rstest]
    // Empty and whitespace-only cases
    #[case::empty(b"", 0)]
    #[case::single_space(b" ", 0)]
    #[case::mixed_whitespace(b"   \t\n  ", 0)]
    #[case::every_whitespace_byte(b" \t\n\x0B\x0C\r", 0)]
    // Single word cases
    #[case::single_word(b"hello", 1)]
    #[case::single_byte_word(b"x", 1)]
    #[case::single_word_with_newline(b"hello\n", 1)]
    #[case::single_word_with_spaces(b" hello ", 1)]
    // Multiple words
    #[case::two_words(b"hello world", 2)]
    #[case::surrounding_whitespace(b"  hello   world  ", 2)]
    #[case::three_words(b"one two three", 3)]
    #[case::every_separator(b"a\nb\tc\r\nd", 4)]
    #[case::separator_run(b"a \t\n b", 2)]
    // Each whitespace byte on its own
    #[case::words_with_tab(b"one\ttwo", 2)]
    #[case::words_with_lf(b"one\ntwo", 2)]
    #[case::words_with_cr(b"one\rtwo", 2)]
    #[case::words_with_vt(b"one\x0Btwo", 2)]
    #[case::words_with_ff(b"one\x0Ctwo", 2)]
    // Bytes that look like separators but are word content
    #[case::nul_is_word_content(b"a\x00b", 1)]
    #[case::unit_separator_is_word_content(b"a\x1Fb", 1)]
    #[case::del_is_word_content(b"a\x7Fb", 1)]
    #[case::nbsp_bytes_are_word_content(b"hello\xC2\xA0world", 1)]
    #[case::next_line_bytes_are_word_content(b"hello\xC2\x85world", 1)]
    // High bytes
    #[case::high_bytes(&[0xFF, 0x20, 0xFE], 2)]
    #[case::invalid_utf8_word(&[0x80, 0x80, 0x0A, 0xC3], 2)]
    // Block boundaries: 16 (SSE2/NEON) and 32 (AVX2) byte blocks
    #[case::word_ends_at_15(b"aaaaaaaaaaaaaaa bbbb", 2)]
    #[case::word_spans_16(b"aaaaaaaaaaaaaaaabbbb cc", 2)]
    #[case::space_at_16(b"aaaaaaaaaaaaaaaa bbbb", 2)]
    #[case::space_at_15(b"aaaaaaaaaaaaaaa\nbbbbbbbbbbbbbbbb", 2)]
    #[case::tab_then_word_at_16(b"               \tb", 1)]
    #[case::word_starts_at_16(b"                b", 1)]
    #[case::word_spans_32(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", 1)]
    #[case::space_at_31(b"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa bbbbbbbbbbbbbbbbbbbb", 2)]
    #[case::word_starts_at_32(b"                                z", 1)]
    #[case::alternating_48(
        b"a a a a a a a a a a a a a a a a a a a a a a a a ",
        24
    )]
    #[case::long_mixed(
        b"The quick\tbrown fox\njumps over\r\nthe lazy\x0Bdog\x0C and keeps   running past the fence",
        15
    )]
    pub fn common_word_count_cases(#[case] input: &[u8], #[case] expected: usize) {}

    // Apply template to test scalar implementation
    #[apply(common_word_count_cases)]
    fn test_count_words_scalar(input: &[u8], expected: usize) {
        assert_eq!(count_words_scalar(input), expected);
    }

    #[apply(common_word_count_cases)]
    fn test_reference_count(input: &[u8], expected: usize) {
        assert_eq!(reference_count(input), expected);
    }

    #[apply(common_word_count_cases)]
    fn test_count_public_entry_point(input: &[u8], expected: usize) {
        assert_eq!(crate::count(input), expected);
    }

    #[test]
    fn test_whitespace_set_is_exactly_six_bytes() {
        let ws: Vec<u8> = (0u8..=255).filter(|&b| is_whitespace_byte(b)).collect();
        assert_eq!(ws, vec![0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20]);
    }

    #[rstest]
    #[case::start_of_input_counts_leading_word(b"abc", true, 1, false)]
    #[case::continuation_inside_word(b"abc", false, 0, false)]
    #[case::continuation_after_gap(b"abc def", false, 1, false)]
    #[case::trailing_whitespace_carried(b"abc ", false, 0, true)]
    #[case::empty_keeps_seed_true(b"", true, 0, true)]
    #[case::empty_keeps_seed_false(b"", false, 0, false)]
    fn test_scalar_with_state(
        #[case] input: &[u8],
        #[case] seed: bool,
        #[case] words: usize,
        #[case] seen_space: bool,
    ) {
        let result = count_words_scalar_with_state(input, seed);
        assert_eq!((result.words, result.seen_space), (words, seen_space));
    }

    #[rstest]
    // "ab  cd" in the low bits of a 16-lane block, rest non-whitespace
    #[case::no_carry(0b0000_0000_0000_1100, 16, false, 1, false)]
    #[case::carry_counts_lane_zero(0b0000_0000_0000_1100, 16, true, 2, false)]
    #[case::all_whitespace(0xFFFF, 16, true, 0, true)]
    #[case::high_bits_ignored_for_narrow_block(0xFFFF_0000, 16, true, 1, false)]
    #[case::last_lane_whitespace_32(0x8000_0000, 32, false, 0, true)]
    #[case::alternating_32(0xAAAA_AAAA, 32, true, 16, true)]
    fn test_count_word_starts_from_mask(
        #[case] mask: u32,
        #[case] width: u32,
        #[case] seed: bool,
        #[case] words: usize,
        #[case] last_is_ws: bool,
    ) {
        assert_eq!(
            count_word_starts_from_mask(mask, width, seed),
            (words, last_is_ws)
        );
    }

    // ====================================================================
    // Property-Based Tests (PropTest)
    // ====================================================================

    fn whitespace_heavy_bytes() -> impl Strategy<Value = Vec<u8>> {
        prop_vec(
            prop_oneof![
                Just(b' '),
                Just(b'\t'),
                Just(b'\n'),
                Just(b'\r'),
                Just(0x0Bu8),
                Just(0x0Cu8),
                any::<u8>(),
            ],
            0..300,
        )
    }

    proptest! {
        #[test]
        fn prop_scalar_matches_reference(input in prop_vec(any::<u8>(), 0..512)) {
            prop_assert_eq!(count_words_scalar(&input), reference_count(&input));
        }

        #[test]
        fn prop_scalar_matches_reference_whitespace_heavy(input in whitespace_heavy_bytes()) {
            prop_assert_eq!(count_words_scalar(&input), reference_count(&input));
        }

        #[test]
        fn prop_count_bounded_by_half_length(input in whitespace_heavy_bytes()) {
            // Every word after the first needs a separator byte before it
            prop_assert!(count_words_scalar(&input) <= input.len().div_ceil(2));
        }

        #[test]
        fn prop_collapsing_whitespace_runs_preserves_count(input in whitespace_heavy_bytes()) {
            let mut collapsed = Vec::with_capacity(input.len());
            for &b in &input {
                if is_whitespace_byte(b) {
                    if collapsed.last() != Some(&b' ') {
                        collapsed.push(b' ');
                    }
                } else {
                    collapsed.push(b);
                }
            }
            prop_assert_eq!(count_words_scalar(&input), count_words_scalar(&collapsed));
        }

        #[test]
        fn prop_split_with_carried_state_matches_whole(
            input in whitespace_heavy_bytes(),
            split in any::<prop::sample::Index>(),
        ) {
            let at = split.index(input.len() + 1);
            let (left, right) = input.split_at(at);
            let first = count_words_scalar_with_state(left, true);
            let second = count_words_scalar_with_state(right, first.seen_space);
            prop_assert_eq!(first.words + second.words, count_words_scalar(&input));
        }

        #[test]
        fn prop_no_whitespace_is_one_word(input in prop_vec(any::<u8>().prop_filter("non-ws", |b| !is_whitespace_byte(*b)), 1..200)) {
            prop_assert_eq!(count_words_scalar(&input), 1);
        }
    }
}
