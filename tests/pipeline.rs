use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crosstalk::{
    AttributionConfig, DeepgramClient, DocumentId, DocumentStore, HttpResultSink, JobId, JobQueue,
    JobRequest, JobState, NotificationSink, Pipeline, QueueConfig, WhisperClient,
};

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<(String, DocumentId)>>,
}

#[async_trait]
impl NotificationSink for RecordingNotifier {
    async fn notify(&self, recipient: &str, document_id: &DocumentId) -> Result<()> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), document_id.clone()));
        Ok(())
    }
}

fn audio_file(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("meeting.mp3");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"\xff\xfbnot really an mp3").unwrap();
    path
}

async fn mount_asr(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/whisper_asr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"start_time": 0.0, "end_time": 2.0, "text": " Hello there."},
            {"start_time": 2.0, "end_time": 4.0, "text": " How are you?"},
            {"start_time": 4.0, "end_time": 6.5, "text": " Doing well, thanks."}
        ])))
        .mount(server)
        .await;
}

async fn mount_deepgram(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .and(query_param("diarize", "true"))
        .and(query_param("punctuate", "true"))
        .and(query_param("utterances", "true"))
        .and(header("Authorization", "Token test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": {
                "utterances": [
                    {"speaker": 0, "start": 0.0, "end": 4.0, "confidence": 0.98},
                    {"speaker": 1, "start": 4.0, "end": 6.6, "confidence": 0.95}
                ]
            }
        })))
        .mount(server)
        .await;
}

const EXPECTED_DOCUMENT: &str = "[Speaker 0] (0.0s - 4.0s):\n Hello there.\n How are you?\n\n\
                                 [Speaker 1] (4.0s - 6.5s):\n Doing well, thanks.\n\n";

#[tokio::test]
async fn test_pipeline_against_mocked_services() {
    let server = MockServer::start().await;
    mount_asr(&server).await;
    mount_deepgram(&server).await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("Authorization", "Bearer upload-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = Pipeline {
        transcription: Arc::new(WhisperClient::new(server.uri())),
        diarization: Arc::new(DeepgramClient::new(server.uri(), "test-key".to_string())),
        notifier: notifier.clone(),
        results: Arc::new(HttpResultSink::new(
            format!("{}/upload", server.uri()),
            "upload-token".to_string(),
        )),
        store: DocumentStore::open(dir.path().join("transcripts")).unwrap(),
        attribution: AttributionConfig::default(),
    };
    let request = JobRequest {
        audio_path: audio_file(&dir),
        notify_address: "user@example.com".to_string(),
    };

    let outcome = pipeline.run(&JobId::new(), &request).await.unwrap();

    assert_eq!(outcome.turns, 2);
    assert_eq!(outcome.attributed, 3);
    assert_eq!(outcome.dropped, 0);
    assert!(outcome.notified);
    assert!(outcome.uploaded);

    let stored = pipeline.store.load(&outcome.document_id).unwrap().unwrap();
    assert_eq!(stored, EXPECTED_DOCUMENT);

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "user@example.com");
    assert_eq!(sent[0].1, outcome.document_id);

    assert_eq!(outcome.summaries.len(), 2);
    assert_eq!(outcome.summaries[0].label(), "Speaker 0");
}

#[tokio::test]
async fn test_diarization_error_fails_the_job() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/listen"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream out of capacity"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(dir.path().join("transcripts")).unwrap();
    let pipeline = Arc::new(Pipeline {
        transcription: Arc::new(WhisperClient::new(server.uri())),
        diarization: Arc::new(DeepgramClient::new(server.uri(), "test-key".to_string())),
        notifier: Arc::new(RecordingNotifier::default()),
        results: Arc::new(HttpResultSink::new(
            format!("{}/upload", server.uri()),
            "upload-token".to_string(),
        )),
        store,
        attribution: AttributionConfig::default(),
    });
    let queue = JobQueue::start(pipeline, QueueConfig::default());

    let id = queue
        .submit(JobRequest {
            audio_path: audio_file(&dir),
            notify_address: "user@example.com".to_string(),
        })
        .unwrap();

    let record = wait_for_terminal(&queue, &id).await;

    assert_eq!(record.state, JobState::Failed);
    let error = record.error.unwrap();
    assert!(error.contains("Deepgram"), "unexpected error: {}", error);
    assert!(record.document_id.is_none());
}

#[tokio::test]
async fn test_queue_end_to_end() {
    let server = MockServer::start().await;
    mount_asr(&server).await;
    mount_deepgram(&server).await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::open(dir.path().join("transcripts")).unwrap();
    let pipeline = Arc::new(Pipeline {
        transcription: Arc::new(WhisperClient::new(server.uri())),
        diarization: Arc::new(DeepgramClient::new(server.uri(), "test-key".to_string())),
        notifier: Arc::new(RecordingNotifier::default()),
        results: Arc::new(HttpResultSink::new(
            format!("{}/upload", server.uri()),
            "upload-token".to_string(),
        )),
        store: store.clone(),
        attribution: AttributionConfig::default(),
    });
    let queue = JobQueue::start(pipeline, QueueConfig::default());

    let id = queue
        .submit(JobRequest {
            audio_path: audio_file(&dir),
            notify_address: "user@example.com".to_string(),
        })
        .unwrap();

    let record = wait_for_terminal(&queue, &id).await;

    assert_eq!(record.state, JobState::Completed);
    assert!(record.finished_at.is_some());

    let document_id = record.document_id.unwrap();
    assert_eq!(store.load(&document_id).unwrap().unwrap(), EXPECTED_DOCUMENT);
}

async fn wait_for_terminal(queue: &JobQueue, id: &JobId) -> crosstalk::JobRecord {
    for _ in 0..200 {
        let record = queue.status(id).unwrap();
        if record.state == JobState::Completed || record.state == JobState::Failed {
            return record;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {} never reached a terminal state", id);
}
