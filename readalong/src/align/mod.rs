//! Word alignment: engine-reported timings resolved to absolute playback
//! time and absolute source-document character ranges.

mod matcher;

use crate::text::TextChunk;
use matcher::{MatchSpan, STRATEGIES};
use tts_client::WordTimestamp;

/// One spoken word, resolved to absolute playback time and an absolute
/// source character range for the highlighter.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedWord {
    /// The word as the engine reported it.
    pub word: String,
    /// Absolute start time in seconds across the whole document.
    pub start_time: f64,
    /// Absolute end time in seconds across the whole document.
    pub end_time: f64,
    /// Absolute source character offset, inclusive.
    pub source_start: usize,
    /// Absolute source character offset, exclusive.
    pub source_end: usize,
}

/// Align one chunk's engine-reported word timings against the chunk text,
/// projecting each matched span back onto source-document coordinates.
///
/// Every non-empty timestamp yields exactly one `MappedWord`, matched or
/// not: dropping a word would desynchronize every later index the
/// playback loop counts on, so unresolvable words anchor at the cursor
/// with best-effort coordinates instead.
pub fn align_words(
    timestamps: &[WordTimestamp],
    chunk: &TextChunk,
    cumulative_time_offset: f64,
) -> Vec<MappedWord> {
    let text: Vec<char> = chunk.text.chars().collect();
    let mut mapped = Vec::with_capacity(timestamps.len());
    // Forward-advancing search position; keeps matches in speaking order.
    let mut cursor = 0usize;

    for stamp in timestamps {
        if stamp.word.trim().is_empty() {
            continue;
        }

        let mut resolved: Option<(MatchSpan, usize)> = None;
        for (rank, strategy) in STRATEGIES.iter().enumerate() {
            if let Some(span) = strategy(&text, cursor, &stamp.word) {
                resolved = Some((span, rank));
                break;
            }
        }

        let span = match resolved {
            Some((span, rank)) => {
                // The backtrack strategy searches behind the cursor and
                // never advances it.
                if rank < 2 {
                    cursor = span.end;
                }
                span
            }
            None => {
                let start = cursor.min(text.len());
                let end = (start + stamp.word.chars().count()).min(text.len());
                log::warn!(
                    "no alignment for reported word {:?} in chunk {}; anchoring at cursor {}",
                    stamp.word,
                    chunk.index,
                    start
                );
                MatchSpan { start, end }
            }
        };

        let (source_start, source_end) = chunk.source_range(span.start, span.end);
        mapped.push(MappedWord {
            word: stamp.word.clone(),
            start_time: stamp.start_time + cumulative_time_offset,
            end_time: stamp.end_time + cumulative_time_offset,
            source_start,
            source_end,
        });
    }

    mapped
}
