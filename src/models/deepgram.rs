use serde::{Deserialize, Serialize};

use super::DiarizationUtterance;

/// Root response from Deepgram API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeepgramResponse {
    pub results: DeepgramResults,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeepgramResults {
    #[serde(default)]
    pub utterances: Vec<DeepgramUtterance>,
}

/// A single utterance from Deepgram with diarization info
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeepgramUtterance {
    /// Numeric speaker identifier
    pub speaker: u32,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// Transcription accuracy score (0-1)
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Deepgram's own text for the utterance, unused downstream
    #[serde(default)]
    pub transcript: Option<String>,
}

impl DeepgramResponse {
    /// Extract speaker intervals, in response order
    pub fn utterances(&self) -> Vec<DiarizationUtterance> {
        self.results
            .utterances
            .iter()
            .map(|u| DiarizationUtterance {
                speaker: u.speaker,
                start: u.start,
                end: u.end,
            })
            .collect()
    }
}
