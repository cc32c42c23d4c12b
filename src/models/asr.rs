use serde::{Deserialize, Serialize};

/// One segment as returned by the ASR service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsrSegment {
    /// Segment start in seconds
    pub start_time: f64,
    /// Segment end in seconds
    pub end_time: f64,
    /// Recognized text, whitespace preserved as received
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_asr_response() {
        let json = r#"[
            {"start_time": 0.0, "end_time": 2.04, "text": " Hello there."},
            {"start_time": 2.04, "end_time": 4.36, "text": " How are you?"}
        ]"#;

        let segments: Vec<AsrSegment> = serde_json::from_str(json).unwrap();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, " Hello there.");
        assert_eq!(segments[1].start_time, 2.04);
    }
}
