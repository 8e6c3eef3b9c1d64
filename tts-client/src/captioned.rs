//! HTTP client for captioned-speech servers.
//!
//! Speaks the Kokoro-FastAPI `/dev/captioned_speech` contract: request is
//! the chunk text plus voice/speed parameters, response is base64-encoded
//! audio together with word-level timestamps.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};
use crate::synthesizer::{SpeechSynthesizer, SynthesisRequest, SynthesisResult, WordTimestamp};

/// Client for a captioned-speech HTTP server.
pub struct CaptionedSpeechClient {
    base_url: String,
    model: String,
    client: Client,
}

impl CaptionedSpeechClient {
    /// Create a new client against the given server base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: "kokoro".to_string(),
            client: Client::new(),
        }
    }

    /// Override the model name sent with each request.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

// Wire types for the /dev/captioned_speech endpoint

#[derive(Debug, Serialize)]
struct CaptionedSpeechRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct CaptionedSpeechResponse {
    /// Base64-encoded audio payload.
    audio: String,
    #[serde(default)]
    duration: Option<f64>,
    #[serde(default)]
    timestamps: Vec<WordTimestamp>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: String,
}

#[async_trait]
impl SpeechSynthesizer for CaptionedSpeechClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResult> {
        let payload = CaptionedSpeechRequest {
            model: &self.model,
            input: &request.text,
            voice: &request.options.voice,
            speed: request.options.speed,
            response_format: "wav",
        };

        let url = format!("{}/dev/captioned_speech", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TtsError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message =
                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                    error_response.detail
                } else {
                    error_text
                };

            if status.as_u16() == 503 {
                return Err(TtsError::ServerOverloaded { message });
            }

            return Err(TtsError::ApiError {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let body: CaptionedSpeechResponse = response
            .json()
            .await
            .map_err(|e| TtsError::MalformedResponse(e.to_string()))?;

        let audio = BASE64.decode(body.audio.as_bytes()).map_err(|e| {
            TtsError::MalformedResponse(format!("audio payload is not valid base64: {}", e))
        })?;

        Ok(SynthesisResult {
            audio,
            duration: body.duration,
            timestamps: body.timestamps,
        })
    }

    fn name(&self) -> &'static str {
        "captioned-speech"
    }
}
