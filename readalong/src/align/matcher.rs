//! Match strategies for locating engine-reported words in chunk text.
//!
//! The engine's words are not guaranteed substrings of what was sent:
//! punctuation is added or dropped, contractions split or merge, casing
//! and smart punctuation differ. Each strategy shares one signature so
//! the aligner can try them as an ordered priority list.

/// Smart punctuation folded to ascii before comparison, matching what
/// speech engines tend to rewrite.
const FOLDED_CHARS: &[(char, char)] = &[
    ('\u{2018}', '\''), // Left single quote
    ('\u{2019}', '\''), // Right single quote
    ('\u{201c}', '"'),  // Left double quote
    ('\u{201d}', '"'),  // Right double quote
    ('\u{2013}', '-'),  // En dash
    ('\u{2014}', '-'),  // Em dash
    ('\u{2011}', '-'),  // Non-breaking hyphen
    ('\u{2012}', '-'),  // Figure dash
    ('\u{2015}', '-'),  // Horizontal bar
];

/// A matched `[start, end)` character span in the chunk text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

/// How far strategy 3 searches behind the cursor.
pub(crate) const BACKTRACK_WINDOW: usize = 40;

/// Ordered strategy list: forward scan, stripped containment, bounded
/// backtrack. The aligner falls back to a cursor anchor when all fail.
pub(crate) const STRATEGIES: [fn(&[char], usize, &str) -> Option<MatchSpan>; 3] =
    [match_forward, match_stripped, match_backtrack];

/// Normalized form of one character: lowercased with smart punctuation
/// folded; `None` for characters carrying no word content (punctuation,
/// symbols, whitespace).
fn normalize_char(c: char) -> Option<char> {
    let folded = FOLDED_CHARS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c);

    if folded.is_alphanumeric() {
        folded.to_lowercase().next()
    } else {
        None
    }
}

/// Word reduced to its normalized content characters.
pub(crate) fn normalize_word(word: &str) -> String {
    word.chars().filter_map(normalize_char).collect()
}

/// Strategy 1: scan forward from the cursor, anchoring at each
/// non-whitespace position. At each anchor, first compare a same-length
/// normalized substring; failing that, walk character by character,
/// treating anything that normalizes to nothing as transparent.
pub(crate) fn match_forward(text: &[char], cursor: usize, word: &str) -> Option<MatchSpan> {
    let target: Vec<char> = normalize_word(word).chars().collect();
    if target.is_empty() {
        return None;
    }
    let word_len = word.chars().count();

    let mut start = cursor;
    while start < text.len() {
        if !text[start].is_whitespace() {
            if let Some(span) = match_at(text, start, word_len, &target) {
                return Some(span);
            }
        }
        start += 1;
    }
    None
}

/// Strategy 2: punctuation-stripped containment. Anchors only at content
/// characters and requires the stripped lookahead to start with the
/// stripped target, which catches merged and split tokens.
pub(crate) fn match_stripped(text: &[char], cursor: usize, word: &str) -> Option<MatchSpan> {
    let target: Vec<char> = normalize_word(word).chars().collect();
    if target.is_empty() {
        return None;
    }

    let mut start = cursor;
    while start < text.len() {
        if normalize_char(text[start]).is_some() {
            if let Some(end) = walk_target(text, start, &target) {
                return Some(MatchSpan { start, end });
            }
        }
        start += 1;
    }
    None
}

/// Strategy 3: strategy-1 matching at anchors up to [`BACKTRACK_WINDOW`]
/// characters behind the cursor, for words the engine reports slightly
/// out of textual order.
pub(crate) fn match_backtrack(text: &[char], cursor: usize, word: &str) -> Option<MatchSpan> {
    let target: Vec<char> = normalize_word(word).chars().collect();
    if target.is_empty() || cursor == 0 {
        return None;
    }
    let word_len = word.chars().count();
    let floor = cursor.saturating_sub(BACKTRACK_WINDOW);

    let mut start = cursor.min(text.len());
    while start > floor {
        start -= 1;
        if !text[start].is_whitespace() {
            if let Some(span) = match_at(text, start, word_len, &target) {
                return Some(span);
            }
        }
    }
    None
}

/// Both position-anchored comparisons of strategy 1.
fn match_at(text: &[char], start: usize, word_len: usize, target: &[char]) -> Option<MatchSpan> {
    let same_length_end = start + word_len;
    let mut pos = if same_length_end <= text.len()
        && text[start..same_length_end]
            .iter()
            .copied()
            .filter_map(normalize_char)
            .eq(target.iter().copied())
    {
        same_length_end
    } else {
        walk_target(text, start, target)?
    };

    // Absorb trailing punctuation (no intervening space) so marks attach
    // to this word rather than anchoring the next one.
    while pos < text.len() && !text[pos].is_whitespace() && normalize_char(text[pos]).is_none() {
        pos += 1;
    }
    Some(MatchSpan { start, end: pos })
}

/// Consume characters from `start` until every target character has been
/// matched in order; characters normalizing to nothing are skipped, any
/// other mismatch fails.
fn walk_target(text: &[char], start: usize, target: &[char]) -> Option<usize> {
    let mut ti = 0;
    let mut pos = start;
    while pos < text.len() && ti < target.len() {
        match normalize_char(text[pos]) {
            Some(c) if c == target[ti] => {
                ti += 1;
                pos += 1;
            }
            Some(_) => return None,
            None => pos += 1,
        }
    }
    (ti == target.len()).then_some(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("Hello,"), "hello");
        assert_eq!(normalize_word("don\u{2019}t"), "dont");
        assert_eq!(normalize_word("well\u{2014}known"), "wellknown");
        assert_eq!(normalize_word("..."), "");
    }

    #[test]
    fn test_forward_exact_match() {
        let text = chars("the quick brown fox");
        let span = match_forward(&text, 0, "quick").unwrap();
        assert_eq!((span.start, span.end), (4, 9));
    }

    #[test]
    fn test_forward_match_starts_at_cursor() {
        let text = chars("go go go");
        assert_eq!(match_forward(&text, 0, "go").unwrap(), MatchSpan { start: 0, end: 2 });
        assert_eq!(match_forward(&text, 2, "go").unwrap(), MatchSpan { start: 3, end: 5 });
        assert_eq!(match_forward(&text, 5, "go").unwrap(), MatchSpan { start: 6, end: 8 });
    }

    #[test]
    fn test_forward_case_and_smart_quotes() {
        let text = chars("\u{201c}Stop\u{201d} she said");
        let span = match_forward(&text, 0, "stop").unwrap();
        // Walk-anchored at the opening quote, closing quote absorbed.
        assert_eq!((span.start, span.end), (0, 6));
    }

    #[test]
    fn test_forward_trailing_punctuation_absorbed() {
        let text = chars("wait... what");
        let span = match_forward(&text, 0, "wait").unwrap();
        assert_eq!((span.start, span.end), (0, 7));
        // The next word still matches cleanly afterward.
        let span = match_forward(&text, span.end, "what").unwrap();
        assert_eq!((span.start, span.end), (8, 12));
    }

    #[test]
    fn test_forward_punctuation_not_absorbed_across_space() {
        let text = chars("end .next");
        let span = match_forward(&text, 0, "end").unwrap();
        assert_eq!((span.start, span.end), (0, 3));
    }

    #[test]
    fn test_forward_contraction_split_by_engine() {
        // Engine reports "dont" for text "don't".
        let text = chars("I don't know");
        let span = match_forward(&text, 0, "dont").unwrap();
        assert_eq!((span.start, span.end), (2, 7));
    }

    #[test]
    fn test_forward_no_match() {
        let text = chars("alpha beta");
        assert!(match_forward(&text, 0, "gamma").is_none());
    }

    #[test]
    fn test_forward_empty_after_normalization() {
        let text = chars("alpha beta");
        assert!(match_forward(&text, 0, "\u{2014}").is_none());
    }

    #[test]
    fn test_stripped_match_merged_token() {
        // Engine merges "of the" into one reported token.
        let text = chars("most of the time");
        let span = match_stripped(&text, 5, "ofthe").unwrap();
        assert_eq!((span.start, span.end), (5, 11));
    }

    #[test]
    fn test_stripped_anchor_skips_punctuation() {
        let text = chars("( hello )");
        let span = match_stripped(&text, 0, "hello").unwrap();
        assert_eq!((span.start, span.end), (2, 7));
    }

    #[test]
    fn test_backtrack_finds_word_behind_cursor() {
        let text = chars("one two three");
        let span = match_backtrack(&text, 8, "two").unwrap();
        assert_eq!((span.start, span.end), (4, 7));
    }

    #[test]
    fn test_backtrack_respects_window() {
        let filler = "x".repeat(60);
        let text = chars(&format!("target {}", filler));
        // Cursor is far past the word, outside the 40-char window.
        assert!(match_backtrack(&text, 60, "target").is_none());
    }

    #[test]
    fn test_backtrack_at_cursor_zero() {
        let text = chars("word");
        assert!(match_backtrack(&text, 0, "word").is_none());
    }
}
