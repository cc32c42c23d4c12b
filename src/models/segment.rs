use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::AsrSegment;

/// Round a timestamp in seconds to one decimal place
pub fn round1(seconds: f64) -> f64 {
    (seconds * 10.0).round() / 10.0
}

/// A timestamped text span produced by the transcription backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
    /// The recognized text - immutable, carried verbatim into the output
    pub text: String,
}

impl TranscriptionSegment {
    /// Create a segment from an ASR service wire segment
    pub fn from_asr(segment: &AsrSegment) -> Self {
        Self {
            start: segment.start_time,
            end: segment.end_time,
            text: segment.text.clone(),
        }
    }

    /// Duration of this segment in seconds
    pub fn duration(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }
}

/// A speech interval assigned to one speaker by the diarization backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiarizationUtterance {
    /// Numeric speaker identifier
    pub speaker: u32,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds
    pub end: f64,
}

/// A transcription segment together with the speaker(s) it is attributed to
///
/// Start and end are the originating segment's timestamps rounded to one
/// decimal. The speaker set is never empty: segments with no qualifying
/// utterance are dropped before construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributedSegment {
    /// Speakers attributed to this segment
    pub speaker_ids: BTreeSet<u32>,
    /// Start timestamp in seconds, rounded to one decimal
    pub start: f64,
    /// End timestamp in seconds, rounded to one decimal
    pub end: f64,
    /// Text from the originating transcription segment
    pub text: String,
}

/// A maximal run of consecutive attributed segments sharing a speaker set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Speaker set shared by every member segment
    pub speaker_ids: BTreeSet<u32>,
    /// Start of the first member segment in seconds
    pub start: f64,
    /// End of the last member segment in seconds
    pub end: f64,
    /// Member texts in time order, one entry per merged segment
    pub texts: Vec<String>,
}

impl Turn {
    /// Header label naming all speakers in the turn, joined with " & "
    pub fn speaker_label(&self) -> String {
        self.speaker_ids
            .iter()
            .map(|id| format!("Speaker {}", id))
            .collect::<Vec<_>>()
            .join(" & ")
    }

    /// Number of segments merged into this turn
    pub fn segment_count(&self) -> usize {
        self.texts.len()
    }
}

/// A short per-speaker preview derived from the attributed segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerSummary {
    /// Numeric speaker identifier
    pub speaker: u32,
    /// The speaker's first up-to-three texts joined with single spaces
    pub excerpt: String,
}

impl SpeakerSummary {
    /// Display label for this speaker
    pub fn label(&self) -> String {
        format!("Speaker {}", self.speaker)
    }
}
