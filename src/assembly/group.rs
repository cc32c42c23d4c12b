use crate::models::{AttributedSegment, Turn};

/// Collapse consecutive segments sharing an identical speaker set into turns
pub fn group_turns(segments: &[AttributedSegment]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut current: Option<Turn> = None;

    for segment in segments {
        match current.as_mut() {
            Some(turn) if turn.speaker_ids == segment.speaker_ids => {
                turn.end = segment.end;
                turn.texts.push(segment.text.clone());
            }
            _ => {
                if let Some(finished) = current.take() {
                    turns.push(finished);
                }
                current = Some(Turn {
                    speaker_ids: segment.speaker_ids.clone(),
                    start: segment.start,
                    end: segment.end,
                    texts: vec![segment.text.clone()],
                });
            }
        }
    }

    if let Some(finished) = current {
        turns.push(finished);
    }

    turns
}

/// Render turns into the flat transcript document
///
/// Each turn gets a `[Speaker N] (start s - end s):` header, one line per
/// original segment text, and a trailing blank line. Segment boundaries
/// inside a turn stay visible as line breaks.
pub fn render_document(turns: &[Turn]) -> String {
    let mut document = String::new();

    for turn in turns {
        document.push_str(&format!(
            "[{}] ({:.1}s - {:.1}s):\n",
            turn.speaker_label(),
            turn.start,
            turn.end
        ));
        for text in &turn.texts {
            document.push_str(text);
            document.push('\n');
        }
        document.push('\n');
    }

    document
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn attributed(speakers: &[u32], start: f64, end: f64, text: &str) -> AttributedSegment {
        AttributedSegment {
            speaker_ids: speakers.iter().copied().collect(),
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_consecutive_same_speaker_merges() {
        let segments = vec![
            attributed(&[0], 0.0, 2.0, " Hello there."),
            attributed(&[0], 2.0, 4.0, " How are you?"),
            attributed(&[1], 4.0, 6.5, " Doing well, thanks."),
        ];

        let turns = group_turns(&segments);

        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker_ids, BTreeSet::from([0]));
        assert_eq!(turns[0].start, 0.0);
        assert_eq!(turns[0].end, 4.0);
        assert_eq!(turns[0].texts.len(), 2);
        assert_eq!(turns[1].texts, vec![" Doing well, thanks."]);
    }

    #[test]
    fn test_speaker_sets_must_match_exactly() {
        let segments = vec![
            attributed(&[0], 0.0, 1.0, " Solo."),
            attributed(&[0, 1], 1.0, 2.0, " Together."),
            attributed(&[0], 2.0, 3.0, " Solo again."),
        ];

        let turns = group_turns(&segments);

        // The shared segment breaks the run even though speaker 0 is in all three
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[1].speaker_ids, BTreeSet::from([0, 1]));
    }

    #[test]
    fn test_no_segments_no_turns() {
        assert!(group_turns(&[]).is_empty());
        assert_eq!(render_document(&[]), "");
    }

    #[test]
    fn test_no_adjacent_turns_share_a_speaker_set() {
        let segments = vec![
            attributed(&[0], 0.0, 1.0, " a"),
            attributed(&[0], 1.0, 2.0, " b"),
            attributed(&[1], 2.0, 3.0, " c"),
            attributed(&[0, 1], 3.0, 4.0, " d"),
            attributed(&[0, 1], 4.0, 5.0, " e"),
            attributed(&[1], 5.0, 6.0, " f"),
        ];

        let turns = group_turns(&segments);

        assert_eq!(turns.len(), 4);
        for pair in turns.windows(2) {
            assert_ne!(pair[0].speaker_ids, pair[1].speaker_ids);
        }
        // Grouping already-maximal runs changes nothing
        let total_texts: usize = turns.iter().map(|t| t.texts.len()).sum();
        assert_eq!(total_texts, segments.len());
    }

    #[test]
    fn test_render_document_format() {
        let segments = vec![
            attributed(&[0], 0.0, 2.0, " Hello there."),
            attributed(&[0], 2.0, 4.0, " How are you?"),
            attributed(&[1], 4.0, 6.5, " Doing well, thanks."),
        ];

        let document = render_document(&group_turns(&segments));

        assert_eq!(
            document,
            "[Speaker 0] (0.0s - 4.0s):\n Hello there.\n How are you?\n\n\
             [Speaker 1] (4.0s - 6.5s):\n Doing well, thanks.\n\n"
        );
    }

    #[test]
    fn test_render_joint_turn_header() {
        let segments = vec![attributed(&[0, 1], 0.0, 1.5, " (overlapping chatter)")];

        let document = render_document(&group_turns(&segments));

        assert!(document.starts_with("[Speaker 0 & Speaker 1] (0.0s - 1.5s):\n"));
    }
}
