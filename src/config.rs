use std::path::PathBuf;

use anyhow::{Context, Result};

/// Runtime configuration for the full processing pipeline
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deepgram API key (from DEEPGRAM_API_KEY env var)
    pub deepgram_api_key: String,
    /// Deepgram endpoint base, overridable for testing
    pub deepgram_base_url: String,
    /// Base URL of the whisper ASR service
    pub asr_base_url: String,
    /// SMTP relay host
    pub smtp_host: String,
    /// SMTP relay username
    pub smtp_username: String,
    /// SMTP relay password
    pub smtp_password: String,
    /// Sender mailbox for notification mail
    pub mail_from: String,
    /// Base URL embedded in notification links
    pub public_base_url: String,
    /// Endpoint the finished document is pushed to
    pub upload_url: String,
    /// Bearer token for the upload endpoint
    pub upload_token: String,
    /// Root directory of the document store
    pub transcripts_dir: PathBuf,
}

impl AppConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self> {
        let deepgram_api_key = std::env::var("DEEPGRAM_API_KEY")
            .context("DEEPGRAM_API_KEY environment variable not set")?;
        let deepgram_base_url = std::env::var("DEEPGRAM_BASE_URL")
            .unwrap_or_else(|_| "https://api.deepgram.com".to_string());
        let asr_base_url =
            std::env::var("ASR_BASE_URL").context("ASR_BASE_URL environment variable not set")?;
        let smtp_host =
            std::env::var("SMTP_HOST").context("SMTP_HOST environment variable not set")?;
        let smtp_username =
            std::env::var("SMTP_USERNAME").context("SMTP_USERNAME environment variable not set")?;
        let smtp_password =
            std::env::var("SMTP_PASSWORD").context("SMTP_PASSWORD environment variable not set")?;
        let mail_from =
            std::env::var("MAIL_FROM").context("MAIL_FROM environment variable not set")?;
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .context("PUBLIC_BASE_URL environment variable not set")?;
        let upload_url =
            std::env::var("UPLOAD_URL").context("UPLOAD_URL environment variable not set")?;
        let upload_token =
            std::env::var("UPLOAD_TOKEN").context("UPLOAD_TOKEN environment variable not set")?;
        let transcripts_dir = std::env::var("TRANSCRIPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./transcripts"));

        Ok(Self {
            deepgram_api_key,
            deepgram_base_url,
            asr_base_url,
            smtp_host,
            smtp_username,
            smtp_password,
            mail_from,
            public_base_url,
            upload_url,
            upload_token,
            transcripts_dir,
        })
    }
}
