use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::{DeepgramClient, DiarizationBackend, TranscriptionBackend, WhisperClient};
use crate::assembly::{
    AttributionConfig, attribute_segments, group_turns, render_document, summarize_speakers,
};
use crate::config::AppConfig;
use crate::models::{JobId, JobOutcome, JobRequest};
use crate::sinks::{EmailNotifier, HttpResultSink, NotificationSink, ResultSink};
use crate::store::DocumentStore;

/// One audio file in, one stored and delivered transcript out
///
/// Collaborators are injected; the pipeline owns no global state beyond
/// them. Diarization, transcription and persistence failures abort the
/// job; notification and upload failures are recorded, not fatal.
pub struct Pipeline {
    pub transcription: Arc<dyn TranscriptionBackend>,
    pub diarization: Arc<dyn DiarizationBackend>,
    pub notifier: Arc<dyn NotificationSink>,
    pub results: Arc<dyn ResultSink>,
    pub store: DocumentStore,
    pub attribution: AttributionConfig,
}

impl Pipeline {
    /// Wire the concrete HTTP collaborators from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let notifier = EmailNotifier::new(
            &config.smtp_host,
            config.smtp_username.clone(),
            config.smtp_password.clone(),
            config.mail_from.clone(),
            config.public_base_url.clone(),
        )?;

        Ok(Self {
            transcription: Arc::new(WhisperClient::new(config.asr_base_url.clone())),
            diarization: Arc::new(DeepgramClient::new(
                config.deepgram_base_url.clone(),
                config.deepgram_api_key.clone(),
            )),
            notifier: Arc::new(notifier),
            results: Arc::new(HttpResultSink::new(
                config.upload_url.clone(),
                config.upload_token.clone(),
            )),
            store: DocumentStore::open(&config.transcripts_dir)?,
            attribution: AttributionConfig::default(),
        })
    }

    /// Run one job start to finish
    pub async fn run(&self, id: &JobId, request: &JobRequest) -> Result<JobOutcome> {
        info!("Job {} processing {:?}", id, request.audio_path);

        let utterances = self
            .diarization
            .diarize(&request.audio_path)
            .await
            .context("Diarization failed")?;
        info!("Job {} diarized into {} utterances", id, utterances.len());

        let segments = self
            .transcription
            .transcribe(&request.audio_path)
            .await
            .context("Transcription failed")?;
        info!("Job {} transcribed into {} segments", id, segments.len());

        let attribution = attribute_segments(&segments, &utterances, &self.attribution);

        let turns = group_turns(&attribution.attributed);
        let document = render_document(&turns);
        let (document_id, document_path) = self
            .store
            .save(&document)
            .context("Failed to persist document")?;
        info!(
            "Job {} rendered {} turns into {:?}",
            id,
            turns.len(),
            document_path
        );

        let summaries = summarize_speakers(&attribution.attributed);

        let notified = match self
            .notifier
            .notify(&request.notify_address, &document_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Job {} notification failed: {:#}", id, e);
                false
            }
        };

        let uploaded = match self.results.push(&document_id, &document).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Job {} upload failed: {:#}", id, e);
                false
            }
        };

        Ok(JobOutcome {
            document_id,
            document_path,
            turns: turns.len(),
            attributed: attribution.attributed.len(),
            dropped: attribution.dropped,
            summaries,
            notified,
            uploaded,
        })
    }
}
