//! Shared speech-synthesis client library for the readalong workspace
//!
//! Provides the boundary contract to the captioned-speech engine:
//! - Request/response types (text in, audio plus word timestamps out)
//! - The `SpeechSynthesizer` trait implemented by every backend
//! - An HTTP client for captioned-speech servers (Kokoro-FastAPI style)
//! - A mock synthesizer for testing

pub mod captioned;
pub mod error;
pub mod mock;
pub mod synthesizer;

pub use captioned::CaptionedSpeechClient;
pub use error::{Result, TtsError};
pub use mock::MockSynthesizer;
pub use synthesizer::{
    SpeechOptions, SpeechSynthesizer, SynthesisRequest, SynthesisResult, WordTimestamp,
};
