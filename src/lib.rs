pub mod adapters;
pub mod assembly;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod sinks;
pub mod store;

pub use adapters::{DeepgramClient, DiarizationBackend, TranscriptionBackend, WhisperClient};
pub use assembly::{
    AttributionConfig, AttributionResult, attribute_segments, group_turns, render_document,
    summarize_speakers,
};
pub use config::AppConfig;
pub use error::SubmitError;
pub use io::{parse_asr_file, parse_asr_json, parse_diarization_file, parse_diarization_json};
pub use models::{
    AttributedSegment, DiarizationUtterance, DocumentId, JobId, JobOutcome, JobRecord, JobRequest,
    JobState, SpeakerSummary, TranscriptionSegment, Turn,
};
pub use pipeline::{JobQueue, Pipeline, QueueConfig, validate_request};
pub use sinks::{EmailNotifier, HttpResultSink, NotificationSink, ResultSink};
pub use store::DocumentStore;
