use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use crate::models::{DeepgramResponse, DiarizationUtterance};

/// Produces speaker-labelled utterance intervals for an audio file
#[async_trait]
pub trait DiarizationBackend: Send + Sync {
    async fn diarize(&self, audio_path: &Path) -> Result<Vec<DiarizationUtterance>>;
}

/// Client for the Deepgram pre-recorded API
pub struct DeepgramClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DeepgramClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl DiarizationBackend for DeepgramClient {
    async fn diarize(&self, audio_path: &Path) -> Result<Vec<DiarizationUtterance>> {
        let bytes = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("Failed to read audio file: {:?}", audio_path))?;

        let response = self
            .client
            .post(format!("{}/v1/listen", self.base_url))
            .query(&[
                ("diarize", "true"),
                ("punctuate", "true"),
                ("utterances", "true"),
            ])
            .header("Authorization", format!("Token {}", self.api_key))
            .header("Content-Type", "audio/mpeg")
            .body(bytes)
            .send()
            .await
            .context("Failed to send request to Deepgram API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Deepgram API error: {} - {}", status, body);
        }

        let response: DeepgramResponse = response
            .json()
            .await
            .context("Failed to parse Deepgram API response")?;

        Ok(response.utterances())
    }
}
