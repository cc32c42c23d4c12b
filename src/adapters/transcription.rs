use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::models::{AsrSegment, TranscriptionSegment};

/// Produces time-ordered transcription segments for an audio file
#[async_trait]
pub trait TranscriptionBackend: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<TranscriptionSegment>>;
}

/// Client for the whisper ASR service
pub struct WhisperClient {
    client: Client,
    base_url: String,
}

impl WhisperClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl TranscriptionBackend for WhisperClient {
    async fn transcribe(&self, audio_path: &Path) -> Result<Vec<TranscriptionSegment>> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("Failed to read audio file: {:?}", audio_path))?;

        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio")
            .to_string();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/mpeg")
            .context("Failed to build multipart body")?;
        let form = Form::new().part("audio_file", part);

        let response = self
            .client
            .post(format!("{}/whisper_asr", self.base_url))
            .multipart(form)
            .send()
            .await
            .context("Failed to send request to ASR service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("ASR service error: {} - {}", status, body);
        }

        let segments: Vec<AsrSegment> = response
            .json()
            .await
            .context("Failed to parse ASR response")?;

        Ok(segments.iter().map(TranscriptionSegment::from_asr).collect())
    }
}
