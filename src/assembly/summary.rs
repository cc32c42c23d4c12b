use std::collections::HashMap;

use crate::models::{AttributedSegment, SpeakerSummary};

/// How many leading texts form a speaker's excerpt
const EXCERPT_TEXTS: usize = 3;

/// Build a short preview per speaker, ordered by first appearance
///
/// A segment shared by several speakers contributes its text to each of
/// them. This is a cheap preview for presentation, not a per-speaker
/// transcript.
pub fn summarize_speakers(segments: &[AttributedSegment]) -> Vec<SpeakerSummary> {
    let mut order: Vec<u32> = Vec::new();
    let mut collected: HashMap<u32, Vec<&str>> = HashMap::new();

    for segment in segments {
        for &speaker in &segment.speaker_ids {
            let texts = collected.entry(speaker).or_insert_with(|| {
                order.push(speaker);
                Vec::new()
            });
            if texts.len() < EXCERPT_TEXTS {
                texts.push(&segment.text);
            }
        }
    }

    order
        .into_iter()
        .map(|speaker| SpeakerSummary {
            speaker,
            excerpt: collected.remove(&speaker).unwrap_or_default().join(" "),
        })
        .collect()
}
