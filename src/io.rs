use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{AsrSegment, DeepgramResponse, DiarizationUtterance, TranscriptionSegment};

/// Parse a saved ASR response file into transcription segments
pub fn parse_asr_file(path: &Path) -> Result<Vec<TranscriptionSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_asr_json(&content)
}

/// Parse an ASR JSON array into transcription segments
pub fn parse_asr_json(json: &str) -> Result<Vec<TranscriptionSegment>> {
    let segments: Vec<AsrSegment> =
        serde_json::from_str(json).context("Failed to parse ASR JSON")?;
    Ok(segments.iter().map(TranscriptionSegment::from_asr).collect())
}

/// Parse a saved Deepgram response file into diarization utterances
pub fn parse_diarization_file(path: &Path) -> Result<Vec<DiarizationUtterance>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_diarization_json(&content)
}

/// Parse a Deepgram JSON response into diarization utterances
pub fn parse_diarization_json(json: &str) -> Result<Vec<DiarizationUtterance>> {
    let response: DeepgramResponse =
        serde_json::from_str(json).context("Failed to parse Deepgram JSON")?;
    Ok(response.utterances())
}
