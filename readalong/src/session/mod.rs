//! Reading session: drives synthesis chunk by chunk with one-chunk
//! pre-fetch, and resolves each response into highlight-ready words.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tts_client::{SpeechOptions, SpeechSynthesizer, SynthesisRequest, SynthesisResult};

use crate::align::{MappedWord, align_words};
use crate::markup::StrippedMarkup;
use crate::text::{TextChunk, split_chunks};

/// One chunk's synthesized audio plus its aligned words, ready for the
/// playback and highlighting surfaces.
#[derive(Debug)]
pub struct ChunkPlayback {
    /// Zero-based chunk position in the document.
    pub chunk_index: usize,
    /// Decoded audio bytes for this chunk.
    pub audio: Vec<u8>,
    /// Audio duration in seconds.
    pub duration: f64,
    /// Aligned words in speaking order, with absolute times and absolute
    /// source ranges.
    pub words: Vec<MappedWord>,
}

/// A single document read-aloud session.
///
/// Synthesis of chunk N+1 is issued while chunk N is being consumed; at
/// most one chunk is handed out at a time, and alignment runs only once a
/// chunk's synthesis response has arrived. Dropping the session cancels
/// the in-flight pre-fetch; its result is discarded unused.
pub struct ReadingSession {
    chunks: Vec<TextChunk>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    options: SpeechOptions,
    position: usize,
    /// Seconds of audio already produced by earlier chunks.
    cumulative_offset: f64,
    prefetch: Option<JoinHandle<tts_client::Result<SynthesisResult>>>,
}

impl ReadingSession {
    /// Create a session over a stripped document.
    pub fn new(
        stripped: &StrippedMarkup,
        max_chunk_size: usize,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        options: SpeechOptions,
    ) -> Self {
        Self {
            chunks: split_chunks(stripped, max_chunk_size),
            synthesizer,
            options,
            position: 0,
            cumulative_offset: 0.0,
            prefetch: None,
        }
    }

    /// Total number of chunks in the document.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Whether every chunk has been handed out.
    pub fn is_finished(&self) -> bool {
        self.position >= self.chunks.len()
    }

    /// Synthesize, align, and return the next chunk, or `None` after the
    /// final one. A synthesis failure surfaces whole; the caller decides
    /// whether to retry the chunk.
    pub async fn next_chunk(&mut self) -> Result<Option<ChunkPlayback>> {
        let index = self.position;
        let task = match self.prefetch.take() {
            Some(task) => task,
            None => match self.spawn_synthesis(index) {
                Some(task) => task,
                None => return Ok(None),
            },
        };

        // On failure no pre-fetch is left behind, so a retry call
        // re-synthesizes this same chunk.
        let result = task
            .await
            .context("synthesis task was cancelled or panicked")??;

        // Pre-fetch the following chunk while this one is played back.
        self.prefetch = self.spawn_synthesis(index + 1);

        let chunk = &self.chunks[index];
        log::debug!(
            "chunk {}/{}: {} timestamps, {} audio bytes",
            index + 1,
            self.chunks.len(),
            result.timestamps.len(),
            result.audio.len()
        );

        let words = align_words(&result.timestamps, chunk, self.cumulative_offset);
        let duration = result
            .duration
            .or_else(|| result.timestamps.last().map(|t| t.end_time))
            .unwrap_or(0.0);

        self.cumulative_offset += duration;
        self.position += 1;

        Ok(Some(ChunkPlayback {
            chunk_index: chunk.index,
            audio: result.audio,
            duration,
            words,
        }))
    }

    fn spawn_synthesis(
        &self,
        index: usize,
    ) -> Option<JoinHandle<tts_client::Result<SynthesisResult>>> {
        let chunk = self.chunks.get(index)?;
        let request = SynthesisRequest::new(chunk.text.clone(), self.options.clone());
        let synthesizer = Arc::clone(&self.synthesizer);
        Some(tokio::spawn(
            async move { synthesizer.synthesize(request).await },
        ))
    }
}

impl Drop for ReadingSession {
    fn drop(&mut self) {
        if let Some(task) = self.prefetch.take() {
            task.abort();
        }
    }
}
