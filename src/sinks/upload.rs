use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};

use crate::models::DocumentId;

/// Pushes a finished document to durable remote storage
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn push(&self, document_id: &DocumentId, document: &str) -> Result<()>;
}

/// Uploads the rendered document to an authenticated HTTP endpoint
pub struct HttpResultSink {
    client: Client,
    upload_url: String,
    token: String,
}

impl HttpResultSink {
    pub fn new(upload_url: String, token: String) -> Self {
        Self {
            client: Client::new(),
            upload_url,
            token,
        }
    }
}

#[async_trait]
impl ResultSink for HttpResultSink {
    async fn push(&self, document_id: &DocumentId, document: &str) -> Result<()> {
        let part = Part::text(document.to_string())
            .file_name(format!("{}.txt", document_id))
            .mime_str("text/plain")
            .context("Failed to build multipart body")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .context("Failed to send document to upload endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Upload endpoint error: {} - {}", status, body);
        }

        Ok(())
    }
}
