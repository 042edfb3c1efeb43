//! Pattern-match strategy: count the maximal matches of "one or more non-whitespace bytes".
//!
//! This is the same run-detection automaton expressed as a regular expression. It is slower
//! than the scans and exists as an independent cross-check.

use regex::bytes::Regex;
use std::sync::LazyLock;

/// Unicode is disabled so the negated class matches every byte value, including bytes that
/// are not valid UTF-8.
const WORD_PATTERN: &str = r"(?-u)[^ \t\n\x0B\x0C\r]+";

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORD_PATTERN).expect("word pattern is a valid regex"));

/// Count non-overlapping, greedy, left-to-right matches of the word pattern.
pub fn count_words_pattern(content: &[u8]) -> usize {
    WORD_RE.find_iter(content).count()
}
