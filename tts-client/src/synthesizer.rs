use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Voice parameters sent with every synthesis request.
#[derive(Debug, Clone)]
pub struct SpeechOptions {
    /// Engine voice identifier.
    pub voice: String,
    /// Speaking rate multiplier (0.5-2.0, default 1.0).
    pub speed: f32,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            voice: "af_heart".to_string(),
            speed: 1.0,
        }
    }
}

impl SpeechOptions {
    /// Create new speech options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine voice.
    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    /// Set the speaking rate.
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed.clamp(0.5, 2.0);
        self
    }
}

/// Request to send to a speech synthesizer: one chunk of plain text.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub options: SpeechOptions,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, options: SpeechOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// One word timing reported by the engine, in seconds relative to the
/// start of this response's audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTimestamp {
    pub word: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl WordTimestamp {
    pub fn new(word: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            word: word.into(),
            start_time,
            end_time,
        }
    }
}

/// Response from a speech synthesizer: decoded audio plus word timings.
#[derive(Debug, Clone)]
pub struct SynthesisResult {
    /// Decoded audio bytes (WAV).
    pub audio: Vec<u8>,
    /// Total audio duration in seconds, when the engine reports one.
    pub duration: Option<f64>,
    /// Word timings in speaking order.
    pub timestamps: Vec<WordTimestamp>,
}

/// Trait for speech synthesis backends.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize one chunk of text into audio with word timestamps.
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult>;

    /// Get the backend name for display.
    fn name(&self) -> &'static str;
}
