//! Chunk splitting: bounded-size segments that keep the offset map intact.

use super::TextChunk;
use crate::markup::offset::slice_for_range;
use crate::markup::{PARAGRAPH_SEPARATOR, StrippedMarkup};

/// Default maximum chunk size in characters.
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 500;

/// Split stripped plain text into bounded-size chunks for the speech
/// engine, slicing the offset map so every chunk can still be projected
/// back onto the source document.
///
/// Whole paragraphs are grouped greedily; a paragraph that alone exceeds
/// `max_chunk_size` is sub-split on sentence boundaries, then on spaces,
/// then at exact character positions as a last resort.
pub fn split_chunks(stripped: &StrippedMarkup, max_chunk_size: usize) -> Vec<TextChunk> {
    let chars: Vec<char> = stripped.plain_text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    let max_size = max_chunk_size.max(1);

    let mut chunks = Vec::new();
    // Accumulated paragraph group as an absolute [start, end) range. The
    // range-based size test counts real separator characters between
    // grouped paragraphs.
    let mut group: Option<(usize, usize)> = None;

    for (para_start, para_end) in paragraph_ranges(&chars) {
        if para_end - para_start > max_size {
            if let Some((start, end)) = group.take() {
                push_chunk(&mut chunks, &chars, &stripped.offset_map, start, end);
            }
            split_oversized(&mut chunks, &chars, &stripped.offset_map, para_start, para_end, max_size);
            continue;
        }

        group = match group {
            None => Some((para_start, para_end)),
            Some((start, _)) if para_end - start <= max_size => Some((start, para_end)),
            Some((start, end)) => {
                push_chunk(&mut chunks, &chars, &stripped.offset_map, start, end);
                Some((para_start, para_end))
            }
        };
    }

    if let Some((start, end)) = group {
        push_chunk(&mut chunks, &chars, &stripped.offset_map, start, end);
    }

    chunks
}

/// Non-empty paragraph ranges, split on the paragraph separator. Empty
/// paragraphs from consecutive separators contribute nothing.
fn paragraph_ranges(chars: &[char]) -> Vec<(usize, usize)> {
    let sep: Vec<char> = PARAGRAPH_SEPARATOR.chars().collect();
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i + sep.len() <= chars.len() {
        if chars[i..i + sep.len()] == sep[..] {
            if i > start {
                ranges.push((start, i));
            }
            i += sep.len();
            start = i;
        } else {
            i += 1;
        }
    }
    if start < chars.len() {
        ranges.push((start, chars.len()));
    }

    ranges
}

/// Sub-split one paragraph that exceeds the chunk limit, never mixing it
/// with neighboring paragraphs.
fn split_oversized(
    chunks: &mut Vec<TextChunk>,
    chars: &[char],
    map: &[crate::markup::OffsetMapping],
    start: usize,
    end: usize,
    max_size: usize,
) {
    let mut cursor = start;

    while cursor < end {
        if end - cursor <= max_size {
            push_chunk(chunks, chars, map, cursor, end);
            break;
        }

        let window_end = cursor + max_size;
        let split_end = find_sentence_split(chars, cursor, window_end)
            .or_else(|| find_space_split(chars, cursor, window_end))
            .unwrap_or(window_end);

        push_chunk(chunks, chars, map, cursor, split_end);

        cursor = split_end;
        while cursor < end && chars[cursor].is_whitespace() {
            cursor += 1;
        }
    }
}

/// Backward scan for a sentence-ending character immediately followed by a
/// space; the split lands just after the punctuation.
fn find_sentence_split(chars: &[char], start: usize, window_end: usize) -> Option<usize> {
    let mut i = window_end;
    while i > start {
        i -= 1;
        if matches!(chars[i], '.' | '!' | '?') && chars.get(i + 1) == Some(&' ') {
            return Some(i + 1);
        }
    }
    None
}

/// Backward scan for the nearest plain space inside the window; the split
/// lands on the space itself, which the caller then skips.
fn find_space_split(chars: &[char], start: usize, window_end: usize) -> Option<usize> {
    let mut i = window_end;
    while i > start + 1 {
        i -= 1;
        if chars[i] == ' ' {
            return Some(i);
        }
    }
    None
}

fn push_chunk(
    chunks: &mut Vec<TextChunk>,
    chars: &[char],
    map: &[crate::markup::OffsetMapping],
    start: usize,
    end: usize,
) {
    if start >= end {
        return;
    }
    let text: String = chars[start..end].iter().collect();
    let offset_map = slice_for_range(map, start, end);
    let index = chunks.len();
    chunks.push(TextChunk::new(text, index, offset_map, start));
}
