//! Mock speech synthesizer for testing
//!
//! Provides a configurable mock backend that can simulate failures and
//! canned timestamp responses without a running engine.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, TtsError};
use crate::synthesizer::{SpeechSynthesizer, SynthesisRequest, SynthesisResult, WordTimestamp};

/// A mock synthesizer for testing pipeline and session behavior.
pub struct MockSynthesizer {
    /// Number of times to fail before succeeding (0 = always succeed)
    fail_count: AtomicUsize,
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return on failure (None = always succeed)
    fail_with: Mutex<Option<TtsError>>,
    /// Texts received by each call, in order
    requests: Mutex<Vec<String>>,
    /// Reported duration of each successful response
    duration: Option<f64>,
}

impl MockSynthesizer {
    /// Create a synthesizer that always succeeds, reporting one timestamp
    /// per whitespace-separated word spread evenly over `duration` seconds.
    pub fn always_succeeds(duration: f64) -> Self {
        Self {
            fail_count: AtomicUsize::new(0),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            duration: Some(duration),
        }
    }

    /// Create a synthesizer that always fails with the given error.
    pub fn always_fails(error: TtsError) -> Self {
        Self {
            fail_count: AtomicUsize::new(usize::MAX),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            requests: Mutex::new(Vec::new()),
            duration: None,
        }
    }

    /// Create a synthesizer that fails `n` times, then succeeds.
    pub fn fails_then_succeeds(n: usize, error: TtsError, duration: f64) -> Self {
        Self {
            fail_count: AtomicUsize::new(n),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            requests: Mutex::new(Vec::new()),
            duration: Some(duration),
        }
    }

    /// Get the number of times synthesize() was called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the chunk texts received so far, in call order.
    pub fn received_texts(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.text.clone());

        let fail_count = self.fail_count.load(Ordering::SeqCst);
        if call_num < fail_count {
            let error = self.fail_with.lock().unwrap();
            if let Some(err) = error.as_ref() {
                return Err(clone_error(err));
            }
        }

        let duration = self.duration.unwrap_or(0.0);
        Ok(SynthesisResult {
            audio: Vec::new(),
            duration: self.duration,
            timestamps: evenly_spread_timestamps(&request.text, duration),
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// One timestamp per whitespace-separated word, durations proportional to
/// word length — the same fallback shape real captioned-speech servers use
/// when the duration predictor is unavailable.
fn evenly_spread_timestamps(text: &str, total_duration: f64) -> Vec<WordTimestamp> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    if total_chars == 0 {
        return Vec::new();
    }

    let mut timestamps = Vec::with_capacity(words.len());
    let mut current = 0.0;
    for word in words {
        let share = word.chars().count() as f64 / total_chars as f64;
        let end = current + share * total_duration;
        timestamps.push(WordTimestamp::new(word, current, end));
        current = end;
    }
    timestamps
}

/// Clone a TtsError (needed because TtsError doesn't implement Clone)
fn clone_error(err: &TtsError) -> TtsError {
    match err {
        TtsError::RequestFailed(s) => TtsError::RequestFailed(s.clone()),
        TtsError::ServerOverloaded { message } => TtsError::ServerOverloaded {
            message: message.clone(),
        },
        TtsError::ApiError {
            message,
            status_code,
        } => TtsError::ApiError {
            message: message.clone(),
            status_code: *status_code,
        },
        TtsError::MalformedResponse(s) => TtsError::MalformedResponse(s.clone()),
    }
}
