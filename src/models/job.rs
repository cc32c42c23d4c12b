use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SpeakerSummary;

/// Opaque identifier for a submitted job (UUID v4)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(String);

impl JobId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for JobId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?.to_string()))
    }
}

/// Opaque identifier for a rendered transcript document (UUID v4)
///
/// Documents are stored and linked by this identifier; it is never a
/// sequential counter, so identifiers cannot collide across jobs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    /// Generate a fresh identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?.to_string()))
    }
}

/// A request to process one staged audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequest {
    /// Path to the staged audio file
    pub audio_path: PathBuf,
    /// Email address that receives the completion link
    pub notify_address: String,
}

/// Lifecycle state of a submitted job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Completed,
    Failed,
}

/// Observable record of a submitted job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub state: JobState,
    pub audio_path: PathBuf,
    pub notify_address: String,
    pub submitted_at: DateTime<Utc>,
    /// Set when the job reaches Completed or Failed
    pub finished_at: Option<DateTime<Utc>>,
    /// Set when the job reaches Completed
    pub document_id: Option<DocumentId>,
    /// Full error chain for a Failed job
    pub error: Option<String>,
}

impl JobRecord {
    /// Fresh record for a just-accepted request
    pub fn queued(id: JobId, request: &JobRequest) -> Self {
        Self {
            id,
            state: JobState::Queued,
            audio_path: request.audio_path.clone(),
            notify_address: request.notify_address.clone(),
            submitted_at: Utc::now(),
            finished_at: None,
            document_id: None,
            error: None,
        }
    }
}

/// Everything one completed pipeline run produced
#[derive(Debug, Clone)]
pub struct JobOutcome {
    /// Identifier the rendered document was persisted under
    pub document_id: DocumentId,
    /// Location of the persisted document
    pub document_path: PathBuf,
    /// Number of turns in the rendered document
    pub turns: usize,
    /// Number of segments attributed to at least one speaker
    pub attributed: usize,
    /// Number of segments dropped for lack of any overlapping utterance
    pub dropped: usize,
    /// Per-speaker previews, not persisted
    pub summaries: Vec<SpeakerSummary>,
    /// Whether the notification email was sent
    pub notified: bool,
    /// Whether the document was pushed to the result sink
    pub uploaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_round_trip() {
        let id = DocumentId::new();
        let parsed: DocumentId = id.as_str().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_document_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<DocumentId>().is_err());
        assert!("".parse::<DocumentId>().is_err());
    }

    #[test]
    fn test_job_ids_are_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }

    #[test]
    fn test_job_state_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&JobState::Queued).unwrap(), "\"queued\"");
        assert_eq!(serde_json::to_string(&JobState::Failed).unwrap(), "\"failed\"");
    }

    #[test]
    fn test_queued_record() {
        let request = JobRequest {
            audio_path: PathBuf::from("/tmp/meeting.mp3"),
            notify_address: "user@example.com".to_string(),
        };
        let id = JobId::new();
        let record = JobRecord::queued(id.clone(), &request);

        assert_eq!(record.id, id);
        assert_eq!(record.state, JobState::Queued);
        assert_eq!(record.audio_path, request.audio_path);
        assert!(record.finished_at.is_none());
        assert!(record.document_id.is_none());
        assert!(record.error.is_none());
    }
}
