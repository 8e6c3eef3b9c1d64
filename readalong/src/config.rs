//! Reader configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::text::DEFAULT_MAX_CHUNK_SIZE;

const DEFAULT_VOICE: &str = "af_heart";
const DEFAULT_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Engine voice identifier
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speaking rate multiplier (0.5-2.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Maximum chunk size in characters sent per synthesis request
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_speed() -> f32 {
    DEFAULT_SPEED
}

fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            voice: default_voice(),
            speed: default_speed(),
            max_chunk_size: default_max_chunk_size(),
        }
    }
}

impl ReaderConfig {
    /// Get the config file path: ~/.config/readalong/config.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("readalong")
            .join("config.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: ReaderConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Speech options carrying this config's voice parameters.
    pub fn speech_options(&self) -> tts_client::SpeechOptions {
        tts_client::SpeechOptions::new()
            .with_voice(self.voice.clone())
            .with_speed(self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.voice, "af_heart");
        assert_eq!(config.speed, 1.0);
        assert_eq!(config.max_chunk_size, 500);
    }

    #[test]
    fn test_config_path() {
        let path = ReaderConfig::config_path();
        assert!(path.is_ok());
        assert!(path.unwrap().ends_with("readalong/config.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
voice = "bf_emma"
speed = 1.3
max_chunk_size = 250
"#;
        let config: ReaderConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voice, "bf_emma");
        assert_eq!(config.speed, 1.3);
        assert_eq!(config.max_chunk_size, 250);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: ReaderConfig = toml::from_str("").unwrap();
        assert_eq!(config.voice, "af_heart");
        assert_eq!(config.max_chunk_size, 500);
    }

    #[test]
    fn test_speech_options_clamp_speed() {
        let config = ReaderConfig {
            speed: 9.0,
            ..Default::default()
        };
        assert_eq!(config.speech_options().speed, 2.0);
    }
}
