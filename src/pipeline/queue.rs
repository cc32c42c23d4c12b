use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::{Semaphore, mpsc};
use tracing::{error, info};

use crate::error::SubmitError;
use crate::models::{JobId, JobRecord, JobRequest, JobState};
use crate::pipeline::Pipeline;

/// Admission and concurrency limits for the job queue
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Jobs processed concurrently
    pub workers: usize,
    /// Jobs waiting for a worker before submissions are refused
    pub capacity: usize,
    /// Lower-case audio extensions accepted at submission
    pub allowed_extensions: Vec<String>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            capacity: 16,
            allowed_extensions: ["mp3", "wav", "m4a", "flac", "ogg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Check a request against the queue's admission rules
pub fn validate_request(
    request: &JobRequest,
    allowed_extensions: &[String],
) -> Result<(), SubmitError> {
    if !request.audio_path.is_file() {
        return Err(SubmitError::MissingFile(request.audio_path.clone()));
    }

    let extension = request
        .audio_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    if !allowed_extensions.contains(&extension) {
        return Err(SubmitError::UnsupportedExtension(extension));
    }

    let address = request.notify_address.trim();
    if address.is_empty() {
        return Err(SubmitError::MissingRecipient);
    }
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(SubmitError::InvalidRecipient(address.to_string())),
    }
}

/// Accepts jobs and runs them through a shared pipeline, bounded both in
/// waiting depth (`capacity`) and concurrent execution (`workers`)
pub struct JobQueue {
    sender: mpsc::Sender<(JobId, JobRequest)>,
    registry: Arc<DashMap<JobId, JobRecord>>,
    closed: AtomicBool,
    config: QueueConfig,
}

impl JobQueue {
    /// Start the dispatcher around a shared pipeline
    pub fn start(pipeline: Arc<Pipeline>, config: QueueConfig) -> Self {
        let (sender, mut receiver) = mpsc::channel::<(JobId, JobRequest)>(config.capacity);
        let registry: Arc<DashMap<JobId, JobRecord>> = Arc::new(DashMap::new());
        let permits = Arc::new(Semaphore::new(config.workers));

        let dispatcher_registry = registry.clone();
        tokio::spawn(async move {
            while let Some((id, request)) = receiver.recv().await {
                let permit = match permits.clone().acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => break,
                };
                let pipeline = pipeline.clone();
                let registry = dispatcher_registry.clone();
                tokio::spawn(async move {
                    let _permit = permit;
                    run_job(pipeline, registry, id, request).await;
                });
            }
        });

        Self {
            sender,
            registry,
            closed: AtomicBool::new(false),
            config,
        }
    }

    /// Validate and enqueue a request; the caller never awaits the job
    pub fn submit(&self, request: JobRequest) -> Result<JobId, SubmitError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(SubmitError::QueueClosed);
        }
        validate_request(&request, &self.config.allowed_extensions)?;

        let id = JobId::new();
        self.registry
            .insert(id.clone(), JobRecord::queued(id.clone(), &request));

        match self.sender.try_send((id.clone(), request)) {
            Ok(()) => {
                info!("Job {} queued", id);
                Ok(id)
            }
            Err(mpsc::error::TrySendError::Full(_)) => {
                self.registry.remove(&id);
                Err(SubmitError::QueueFull)
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.registry.remove(&id);
                Err(SubmitError::QueueClosed)
            }
        }
    }

    /// Current record for a job, if the id is known
    pub fn status(&self, id: &JobId) -> Option<JobRecord> {
        self.registry.get(id).map(|record| record.value().clone())
    }

    /// Stop accepting submissions; queued and running jobs still finish
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        info!("Job queue closed to new submissions");
    }
}

async fn run_job(
    pipeline: Arc<Pipeline>,
    registry: Arc<DashMap<JobId, JobRecord>>,
    id: JobId,
    request: JobRequest,
) {
    if let Some(mut record) = registry.get_mut(&id) {
        record.state = JobState::Running;
    }
    info!("Job {} started", id);

    match pipeline.run(&id, &request).await {
        Ok(outcome) => {
            if let Some(mut record) = registry.get_mut(&id) {
                record.state = JobState::Completed;
                record.document_id = Some(outcome.document_id.clone());
                record.finished_at = Some(Utc::now());
            }
            info!("Job {} completed with document {}", id, outcome.document_id);
        }
        Err(e) => {
            if let Some(mut record) = registry.get_mut(&id) {
                record.state = JobState::Failed;
                record.error = Some(format!("{:#}", e));
                record.finished_at = Some(Utc::now());
            }
            error!("Job {} failed: {:#}", id, e);
        }
    }
}
