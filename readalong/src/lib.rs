//! readalong - turn lightweight-markup documents into speech while keeping
//! a visual cursor in the source synchronized with the spoken audio.
//!
//! The pipeline runs leaf-first over three pure stages:
//! 1. [`markup::strip`] removes markup, producing plain narratable text
//!    plus an offset map back to source characters.
//! 2. [`text::split_chunks`] cuts the plain text into bounded segments for
//!    the speech engine, slicing the offset map per chunk.
//! 3. [`align::align_words`] resolves the engine's reported word timings
//!    against the chunk text and projects them onto source coordinates.
//!
//! [`session::ReadingSession`] drives the stages against a
//! [`tts_client::SpeechSynthesizer`], pre-fetching one chunk ahead.

pub mod align;
pub mod config;
pub mod markup;
pub mod session;
pub mod text;

pub use align::{MappedWord, align_words};
pub use config::ReaderConfig;
pub use markup::{
    MarkupNode, NodeKind, OffsetMapping, SourceSpan, StrippedMarkup, plain_offset_to_source, strip,
};
pub use session::{ChunkPlayback, ReadingSession};
pub use text::{TextChunk, split_chunks};
