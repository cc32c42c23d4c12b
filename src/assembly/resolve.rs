use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::models::{AttributedSegment, DiarizationUtterance, TranscriptionSegment, round1};

/// Tuning knobs for speaker attribution
#[derive(Debug, Clone)]
pub struct AttributionConfig {
    /// Overlap ratio at or above which a single speaker claims the whole segment
    pub dominant_ratio: f64,
    /// Floor applied to segment duration before ratios are computed
    pub min_duration: f64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            dominant_ratio: 0.8,
            min_duration: 0.1,
        }
    }
}

/// Attribution output with drop accounting
#[derive(Debug, Clone)]
pub struct AttributionResult {
    /// Segments that matched at least one speaker, in input order
    pub attributed: Vec<AttributedSegment>,
    /// Segments discarded for lack of any overlapping utterance
    pub dropped: usize,
    /// Segments examined
    pub total: usize,
}

/// Assign speakers to each transcription segment by temporal overlap
///
/// Segment times are rounded to one decimal before any arithmetic;
/// utterance times are used as received. A speaker covering at least
/// `dominant_ratio` of the segment claims it alone; otherwise every
/// speaker with positive overlap shares it. Segments nobody overlaps
/// are dropped and counted, never errors.
pub fn attribute_segments(
    segments: &[TranscriptionSegment],
    utterances: &[DiarizationUtterance],
    config: &AttributionConfig,
) -> AttributionResult {
    let mut attributed = Vec::new();
    let mut dropped = 0;

    for segment in segments {
        let start = round1(segment.start);
        let end = round1(segment.end);
        let duration = (end - start).max(config.min_duration);

        // Overlap ratio per utterance, best first. The sort is stable,
        // so equal ratios keep diarization order.
        let mut ranked: Vec<(u32, f64)> = utterances
            .iter()
            .map(|u| {
                let overlap = (end.min(u.end) - start.max(u.start)).max(0.0);
                (u.speaker, overlap / duration)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut speakers = BTreeSet::new();
        for (speaker, ratio) in ranked {
            if ratio >= config.dominant_ratio {
                speakers = BTreeSet::from([speaker]);
                break;
            } else if ratio > 0.0 {
                speakers.insert(speaker);
            }
        }

        if speakers.is_empty() {
            debug!(
                "No speaker found for segment {}s - {}s, dropping",
                start, end
            );
            dropped += 1;
            continue;
        }

        attributed.push(AttributedSegment {
            speaker_ids: speakers,
            start,
            end,
            text: segment.text.clone(),
        });
    }

    info!(
        "Attributed {} of {} segments ({} dropped)",
        attributed.len(),
        segments.len(),
        dropped
    );

    AttributionResult {
        attributed,
        dropped,
        total: segments.len(),
    }
}
